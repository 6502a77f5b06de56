//! Integration tests for the forgot/reset password flow

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use common::TestContext;
use sm_core::domain::entities::user::Role;

const FORGOT: &str = "/api/password/forgot-password";
const RESET: &str = "/api/password/reset-password";

#[actix_web::test]
async fn test_reset_token_redeems_exactly_once() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    ctx.seed_user("Ann", "ann@x.com", Role::User).await;

    let req = test::TestRequest::post()
        .uri(FORGOT)
        .set_json(json!({"email": "ann@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "If email exists, reset link sent");

    let token = json["resetToken"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 64);
    assert_eq!(ctx.sender.last_token().as_deref(), Some(token.as_str()));

    let req = test::TestRequest::post()
        .uri(RESET)
        .set_json(json!({"token": token, "newPassword": "new-secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "Password reset successful");

    // Second redemption of the same token
    let req = test::TestRequest::post()
        .uri(RESET)
        .set_json(json!({"token": token, "newPassword": "another"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "invalid_reset_token");
    assert_eq!(json["message"], "Invalid or expired token");

    // The first new password is the one that sticks
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ann@x.com", "password": "new-secret"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_expired_reset_token_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    ctx.seed_user("Ann", "ann@x.com", Role::User).await;

    let req = test::TestRequest::post()
        .uri(FORGOT)
        .set_json(json!({"email": "ann@x.com"}))
        .to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;
    let token = json["resetToken"].as_str().unwrap().to_string();

    ctx.users
        .set_reset_expiry("ann@x.com", Utc::now() - Duration::minutes(1))
        .await;

    let req = test::TestRequest::post()
        .uri(RESET)
        .set_json(json!({"token": token, "newPassword": "new-secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "Invalid or expired token");
}

#[actix_web::test]
async fn test_unknown_email_gets_same_response_shape() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(FORGOT)
        .set_json(json!({"email": "nobody@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "If email exists, reset link sent");
    assert!(json["resetToken"].is_string());
    assert!(ctx.sender.last_token().is_none());
}

#[actix_web::test]
async fn test_token_hidden_unless_exposure_enabled() {
    let ctx = TestContext::with_exposed_tokens(false);
    let app = test::init_service(ctx.app()).await;
    ctx.seed_user("Ann", "ann@x.com", Role::User).await;

    let req = test::TestRequest::post()
        .uri(FORGOT)
        .set_json(json!({"email": "ann@x.com"}))
        .to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(json["message"], "If email exists, reset link sent");
    assert!(json.get("resetToken").is_none());
    assert!(ctx.sender.last_token().is_some());
}

#[actix_web::test]
async fn test_missing_fields() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(FORGOT)
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "Email required");

    for body in [
        json!({"token": "abc"}),
        json!({"newPassword": "pw"}),
        json!({"token": "  ", "newPassword": "pw"}),
    ] {
        let req = test::TestRequest::post().uri(RESET).set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "All fields required");
    }
}

#[actix_web::test]
async fn test_over_long_new_password_is_not_reported_missing() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(RESET)
        .set_json(json!({"token": "abc", "newPassword": "p".repeat(73)}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "New password must be at most 72 characters");
}
