//! Test doubles for student service tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::entities::student::ImageUpload;
use crate::errors::DomainError;
use crate::services::student::ImageStorage;

/// Image storage that only records paths
#[derive(Default)]
pub struct MockImageStorage {
    pub stored: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStorage for MockImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let mut stored = self.stored.lock().unwrap();
        let path = format!("/uploads/students/{}.{}", stored.len() + 1, upload.extension().unwrap_or("bin"));
        stored.push(path.clone());
        Ok(path)
    }

    async fn remove(&self, public_path: &str) -> Result<(), DomainError> {
        self.removed.lock().unwrap().push(public_path.to_string());
        Ok(())
    }
}
