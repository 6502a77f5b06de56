//! Student service implementation

use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::student::{ImageUpload, Student, StudentForm, StudentWithOwner};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::StudentRepository;

use super::config::StudentServiceConfig;
use super::storage::ImageStorage;

const STUDENT: &str = "Student";

pub struct StudentService<S, I>
where
    S: StudentRepository,
    I: ImageStorage,
{
    student_repository: Arc<S>,
    image_storage: Arc<I>,
    config: StudentServiceConfig,
}

impl<S, I> StudentService<S, I>
where
    S: StudentRepository,
    I: ImageStorage,
{
    pub fn new(student_repository: Arc<S>, image_storage: Arc<I>, config: StudentServiceConfig) -> Self {
        Self {
            student_repository,
            image_storage,
            config,
        }
    }

    /// All students with their owner's name, newest first
    pub async fn list(&self) -> DomainResult<Vec<StudentWithOwner>> {
        self.student_repository.list_with_owner().await
    }

    /// Create a student owned by the caller
    pub async fn create(
        &self,
        identity: &Identity,
        form: StudentForm,
        image: Option<ImageUpload>,
    ) -> DomainResult<Student> {
        let details = form.validate()?;
        if let Some(upload) = &image {
            self.check_image(upload)?;
        }

        let image_path = self.store_image(image.as_ref()).await?;

        match self
            .student_repository
            .create(details, image_path.clone(), identity.id)
            .await
        {
            Ok(student) => {
                tracing::info!(student_id = student.id, owner_id = identity.id, "Student created");
                Ok(student)
            }
            Err(e) => {
                self.discard_image(image_path.as_deref()).await;
                Err(e)
            }
        }
    }

    /// Replace every field of a student the caller owns. Without a new image
    /// the previous one is kept.
    pub async fn update(
        &self,
        identity: &Identity,
        id: i64,
        form: StudentForm,
        image: Option<ImageUpload>,
    ) -> DomainResult<()> {
        let existing = self.owned_student(identity, id).await?;

        let details = form.validate()?;
        if let Some(upload) = &image {
            self.check_image(upload)?;
        }

        let new_image = self.store_image(image.as_ref()).await?;
        let image_path = new_image.clone().or_else(|| existing.image.clone());

        let updated = match self
            .student_repository
            .update(id, identity.id, details, image_path)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_image(new_image.as_deref()).await;
                return Err(e);
            }
        };

        if !updated {
            // Deleted or reassigned between the ownership check and the update
            self.discard_image(new_image.as_deref()).await;
            return Err(DomainError::not_found(STUDENT));
        }

        if new_image.is_some() {
            self.discard_image(existing.image.as_deref()).await;
        }

        tracing::info!(student_id = id, owner_id = identity.id, "Student updated");
        Ok(())
    }

    /// Delete a student the caller owns
    pub async fn delete(&self, identity: &Identity, id: i64) -> DomainResult<()> {
        let existing = self.owned_student(identity, id).await?;

        if !self.student_repository.delete(id, identity.id).await? {
            return Err(DomainError::not_found(STUDENT));
        }

        self.discard_image(existing.image.as_deref()).await;

        tracing::info!(student_id = id, owner_id = identity.id, "Student deleted");
        Ok(())
    }

    /// Load a student and check it belongs to the caller
    async fn owned_student(&self, identity: &Identity, id: i64) -> DomainResult<Student> {
        let student = self
            .student_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(STUDENT))?;

        if student.created_by != identity.id {
            tracing::warn!(student_id = id, caller_id = identity.id, "Rejected change to another user's student");
            return Err(DomainError::forbidden("Not allowed"));
        }

        Ok(student)
    }

    fn check_image(&self, upload: &ImageUpload) -> Result<(), ValidationError> {
        if !upload.is_image() {
            return Err(ValidationError::UnsupportedFileType {
                content_type: upload.content_type.clone(),
            });
        }
        if upload.bytes.len() > self.config.max_image_bytes {
            return Err(ValidationError::FileTooLarge {
                max_bytes: self.config.max_image_bytes,
            });
        }
        Ok(())
    }

    async fn store_image(&self, upload: Option<&ImageUpload>) -> DomainResult<Option<String>> {
        match upload {
            Some(upload) => Ok(Some(self.image_storage.store(upload).await?)),
            None => Ok(None),
        }
    }

    async fn discard_image(&self, public_path: Option<&str>) {
        if let Some(path) = public_path {
            if let Err(e) = self.image_storage.remove(path).await {
                tracing::warn!(path = path, error = %e, "Failed to remove image");
            }
        }
    }
}
