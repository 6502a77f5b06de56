//! Assistant service implementation

use std::sync::Arc;

use sm_shared::utils::validation::not_empty;

use crate::domain::value_objects::{ChatMessage, StudentContext};
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::StudentRepository;

use super::client::{AssistantClient, AssistantReply, AssistantRequest};

/// Answer given when the chat backend cannot be reached
pub const FALLBACK_ANSWER: &str = "I'm having trouble thinking right now. Try again?";

const INSTRUCTIONS: &str = "## Task and Context\n\
You are a versatile Student Management Assistant with access to the database data below.\n\
\n\
## Instructions\n\
1. If a question is about the students or the database, use the DATABASE DATA.\n\
2. If a question is general, answer helpfully from general knowledge.\n\
3. If asked about a student that is not in the list, say you do not have that record.\n\
4. Be professional and concise, and use Markdown for tables or lists.";

pub struct AssistantService<S, A>
where
    S: StudentRepository,
    A: AssistantClient,
{
    student_repository: Arc<S>,
    client: Arc<A>,
}

impl<S, A> AssistantService<S, A>
where
    S: StudentRepository,
    A: AssistantClient,
{
    pub fn new(student_repository: Arc<S>, client: Arc<A>) -> Self {
        Self {
            student_repository,
            client,
        }
    }

    /// Summarize the student table for the assistant
    pub async fn context(&self) -> DomainResult<StudentContext> {
        let students = self.student_repository.list().await?;
        Ok(StudentContext::from_students(&students))
    }

    /// Ask a question with the previous conversation.
    ///
    /// A failing chat backend degrades to [`FALLBACK_ANSWER`] with the history
    /// returned unchanged; only a blank question or a store failure is an error.
    pub async fn ask(&self, question: &str, history: Vec<ChatMessage>) -> DomainResult<AssistantReply> {
        if !not_empty(question) {
            return Err(ValidationError::RequiredField {
                field: "question".to_string(),
            }
            .into());
        }

        let context = self.context().await?;
        let request = AssistantRequest {
            preamble: format!("{}\n\n## Database Context\n{}", INSTRUCTIONS, context.to_facts()),
            message: question.trim().to_string(),
            chat_history: history.clone(),
        };

        match self.client.chat(request).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                tracing::error!(error = %e, "Assistant backend failed");
                Ok(AssistantReply {
                    answer: FALLBACK_ANSWER.to_string(),
                    history,
                })
            }
        }
    }
}
