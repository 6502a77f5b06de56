//! Student repository trait.
//!
//! Mutations take the caller's user id and only touch rows that user owns,
//! so a row that changed owner or vanished after an ownership check is
//! reported as "no row affected" rather than silently modified.

use async_trait::async_trait;

use crate::domain::entities::student::{NewStudent, Student, StudentWithOwner};
use crate::errors::DomainError;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students joined with their owner's name, newest first
    async fn list_with_owner(&self) -> Result<Vec<StudentWithOwner>, DomainError>;

    /// All students, newest first
    async fn list(&self) -> Result<Vec<Student>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError>;

    /// Insert a student owned by `created_by`
    async fn create(
        &self,
        student: NewStudent,
        image: Option<String>,
        created_by: i64,
    ) -> Result<Student, DomainError>;

    /// Overwrite every field of student `id` if it is owned by `owner_id`
    ///
    /// # Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - No row with that id and owner
    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        student: NewStudent,
        image: Option<String>,
    ) -> Result<bool, DomainError>;

    /// Delete student `id` if it is owned by `owner_id`
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, DomainError>;
}
