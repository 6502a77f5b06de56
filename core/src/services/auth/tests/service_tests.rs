//! Unit tests for authentication service

use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::user::{NewUser, Role};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, PasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::FailingUserRepository;

fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    }))
}

fn create_service() -> (AuthService<MockUserRepository>, Arc<MockUserRepository>, Arc<TokenService>) {
    let repo = Arc::new(MockUserRepository::new());
    let tokens = token_service();
    let service = AuthService::new(
        repo.clone(),
        tokens.clone(),
        AuthServiceConfig { bcrypt_cost: 4 },
    );
    (service, repo, tokens)
}

#[tokio::test]
async fn test_register_then_duplicate_conflicts() {
    let (service, repo, _) = create_service();

    let user = service.register("A", "a@x.com", "pw").await.unwrap();
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.role, Role::User);

    let second = service.register("A again", "a@x.com", "pw2").await;
    assert!(matches!(second, Err(DomainError::Conflict { .. })));
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_register_normalizes_email_and_hashes_password() {
    let (service, repo, _) = create_service();

    service.register("A", "  A@X.com ", "pw").await.unwrap();

    let stored = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "pw");
    assert!(stored.password_hash.starts_with("$2"));

    let duplicate = service.register("B", "a@x.COM", "pw").await;
    assert!(matches!(duplicate, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let (service, _, _) = create_service();

    for (name, email, password) in [("", "a@x.com", "pw"), ("A", " ", "pw"), ("A", "a@x.com", "")] {
        let result = service.register(name, email, password).await;
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::AllFieldsRequired))
        ));
    }

    let result = service.register("A", "not-an-email", "pw").await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_login_returns_token_for_same_user() {
    let (service, _, tokens) = create_service();
    let user = service.register("A", "a@x.com", "pw").await.unwrap();

    let result = service.login("a@x.com", "pw").await.unwrap();
    assert_eq!(result.user, user);

    let identity = tokens.authenticate(&result.token).unwrap();
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.role, Role::User);
    assert_eq!(identity.email, "a@x.com");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (service, _, _) = create_service();
    service.register("A", "a@x.com", "pw").await.unwrap();

    let wrong_password = service.login("a@x.com", "nope").await.unwrap_err();
    let unknown_email = service.login("b@x.com", "pw").await.unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        unknown_email,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let (service, repo, _) = create_service();
    service.register("A", "a@x.com", "pw").await.unwrap();
    let admin = repo
        .create(NewUser {
            name: "Root".to_string(),
            email: "root@x.com".to_string(),
            password_hash: PasswordHasher::new(4).hash("pw").await.unwrap(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    let denied = service
        .list_users(&Identity::new(1, "a@x.com", Role::User))
        .await;
    assert!(matches!(
        denied,
        Err(DomainError::Auth(AuthError::InsufficientPermissions))
    ));

    let users = service
        .list_users(&Identity::new(admin.id, "root@x.com", Role::Admin))
        .await
        .unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "root@x.com");
}

#[tokio::test]
async fn test_store_failure_is_internal() {
    let service = AuthService::new(
        Arc::new(FailingUserRepository),
        token_service(),
        AuthServiceConfig { bcrypt_cost: 4 },
    );

    let result = service.login("a@x.com", "pw").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
