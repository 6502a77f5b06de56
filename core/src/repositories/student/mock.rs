//! In-memory implementation of StudentRepository for tests

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::student::{NewStudent, Student, StudentWithOwner};
use crate::errors::DomainError;

use super::trait_::StudentRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    students: BTreeMap<i64, Student>,
    owner_names: HashMap<i64, String>,
}

/// Mock student repository
#[derive(Clone, Default)]
pub struct MockStudentRepository {
    state: Arc<RwLock<State>>,
}

impl MockStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the display name used for `owner_name` in listings
    pub async fn set_owner_name(&self, user_id: i64, name: impl Into<String>) {
        self.state
            .write()
            .await
            .owner_names
            .insert(user_id, name.into());
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.students.len()
    }

    fn newest_first(students: &BTreeMap<i64, Student>) -> Vec<Student> {
        let mut all: Vec<Student> = students.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        all
    }
}

#[async_trait]
impl StudentRepository for MockStudentRepository {
    async fn list_with_owner(&self) -> Result<Vec<StudentWithOwner>, DomainError> {
        let state = self.state.read().await;
        Ok(Self::newest_first(&state.students)
            .into_iter()
            .map(|student| StudentWithOwner {
                owner_name: state.owner_names.get(&student.created_by).cloned(),
                student,
            })
            .collect())
    }

    async fn list(&self) -> Result<Vec<Student>, DomainError> {
        let state = self.state.read().await;
        Ok(Self::newest_first(&state.students))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        Ok(self.state.read().await.students.get(&id).cloned())
    }

    async fn create(
        &self,
        student: NewStudent,
        image: Option<String>,
        created_by: i64,
    ) -> Result<Student, DomainError> {
        let mut state = self.state.write().await;
        state.next_id += 1;

        // Keep insertion order observable even when the clock does not move
        let created_at = Utc::now() + Duration::microseconds(state.next_id);
        let stored = Student {
            id: state.next_id,
            name: student.name,
            age: student.age,
            email: student.email,
            phone: student.phone,
            gender: student.gender,
            course: student.course,
            address: student.address,
            image,
            created_by,
            created_at,
        };
        state.students.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        student: NewStudent,
        image: Option<String>,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.students.get_mut(&id) {
            Some(existing) if existing.created_by == owner_id => {
                existing.name = student.name;
                existing.age = student.age;
                existing.email = student.email;
                existing.phone = student.phone;
                existing.gender = student.gender;
                existing.course = student.course;
                existing.address = student.address;
                existing.image = image;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let owned = state
            .students
            .get(&id)
            .map(|s| s.created_by == owner_id)
            .unwrap_or(false);
        if owned {
            state.students.remove(&id);
        }
        Ok(owned)
    }
}
