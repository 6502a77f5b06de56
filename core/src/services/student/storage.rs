//! Storage seam for uploaded student images

use async_trait::async_trait;

use crate::domain::entities::student::ImageUpload;
use crate::errors::DomainError;

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Persist an image and return the public path it is served under
    async fn store(&self, upload: &ImageUpload) -> Result<String, DomainError>;

    /// Remove a previously stored image by its public path
    async fn remove(&self, public_path: &str) -> Result<(), DomainError>;
}
