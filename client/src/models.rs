//! Wire types exchanged with the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account as returned by login and the users listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub owner_name: Option<String>,
}

/// Form values for creating or updating a student
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub age: Option<u32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
}

impl StudentInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Non-empty fields as multipart text parts
    pub(crate) fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.name.clone())];
        if let Some(age) = self.age {
            fields.push(("age", age.to_string()));
        }

        let optional = [
            ("email", &self.email),
            ("phone", &self.phone),
            ("gender", &self.gender),
            ("course", &self.course),
            ("address", &self.address),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.push((name, value.to_string()));
            }
        }

        fields
    }
}

/// Image attached to a student form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One turn of an assistant conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskReply {
    pub answer: String,
    #[serde(rename = "newHistory", default)]
    pub new_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordReply {
    pub message: String,
    #[serde(rename = "resetToken", default)]
    pub reset_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginReply {
    pub token: String,
    pub user: User,
}
