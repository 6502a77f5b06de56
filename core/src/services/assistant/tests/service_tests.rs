//! Unit tests for the assistant service

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::student::NewStudent;
use crate::domain::value_objects::ChatMessage;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{MockStudentRepository, StudentRepository};
use crate::services::assistant::{
    AssistantClient, AssistantReply, AssistantRequest, AssistantService, FALLBACK_ANSWER,
};

/// Echoes the question back and remembers the last request
#[derive(Default)]
struct EchoClient {
    last: Mutex<Option<AssistantRequest>>,
}

#[async_trait]
impl AssistantClient for EchoClient {
    async fn chat(&self, request: AssistantRequest) -> Result<AssistantReply, DomainError> {
        let mut history = request.chat_history.clone();
        history.push(ChatMessage {
            role: "USER".to_string(),
            message: request.message.clone(),
        });
        let answer = format!("echo: {}", request.message);
        *self.last.lock().unwrap() = Some(request);
        Ok(AssistantReply { answer, history })
    }
}

struct DownClient;

#[async_trait]
impl AssistantClient for DownClient {
    async fn chat(&self, _request: AssistantRequest) -> Result<AssistantReply, DomainError> {
        Err(DomainError::internal("connection refused"))
    }
}

async fn seeded_repo() -> Arc<MockStudentRepository> {
    let repo = Arc::new(MockStudentRepository::new());
    for (name, course) in [("Ann", Some("Math")), ("Ben", None)] {
        repo.create(
            NewStudent {
                name: name.to_string(),
                course: course.map(String::from),
                ..Default::default()
            },
            None,
            1,
        )
        .await
        .unwrap();
    }
    repo
}

#[tokio::test]
async fn test_ask_sends_database_facts() {
    let client = Arc::new(EchoClient::default());
    let service = AssistantService::new(seeded_repo().await, client.clone());

    let reply = service.ask("How many students?", Vec::new()).await.unwrap();
    assert_eq!(reply.answer, "echo: How many students?");
    assert_eq!(reply.history.len(), 1);

    let request = client.last.lock().unwrap().clone().unwrap();
    assert!(request.preamble.contains("Total Students: 2"));
    assert!(request.preamble.contains("General: 1"));
    assert!(request.preamble.contains("Math: 1"));
}

#[tokio::test]
async fn test_backend_failure_falls_back() {
    let service = AssistantService::new(seeded_repo().await, Arc::new(DownClient));
    let history = vec![ChatMessage {
        role: "USER".to_string(),
        message: "hi".to_string(),
    }];

    let reply = service.ask("Anyone there?", history.clone()).await.unwrap();
    assert_eq!(reply.answer, FALLBACK_ANSWER);
    assert_eq!(reply.history, history);
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let service = AssistantService::new(seeded_repo().await, Arc::new(DownClient));

    let result = service.ask("   ", Vec::new()).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::RequiredField { .. }))
    ));
}
