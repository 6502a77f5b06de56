//! Stores student images under `<upload dir>/students/<uuid>.<ext>`; the
//! upload directory itself is served at `/uploads`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use sm_core::domain::entities::student::ImageUpload;
use sm_core::errors::{DomainError, ValidationError};
use sm_core::services::ImageStorage;

use crate::InfrastructureError;

/// URL prefix the upload directory is mounted under
pub const PUBLIC_UPLOADS_PREFIX: &str = "/uploads";

/// Sub-directory for student images
pub const STUDENT_IMAGE_DIR: &str = "students";

#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a public path back to a file inside the upload directory.
    /// Returns `None` for paths outside the upload prefix or with `..`.
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path
            .strip_prefix(PUBLIC_UPLOADS_PREFIX)?
            .trim_start_matches('/');
        let relative = Path::new(relative);

        if relative.as_os_str().is_empty()
            || !relative.components().all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let extension = upload
            .extension()
            .ok_or_else(|| ValidationError::UnsupportedFileType {
                content_type: upload.content_type.clone(),
            })?;

        let dir = self.root.join(STUDENT_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(InfrastructureError::from)?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&file_name), &upload.bytes)
            .await
            .map_err(InfrastructureError::from)?;

        tracing::debug!(file = %file_name, bytes = upload.bytes.len(), "Stored student image");
        Ok(format!("{}/{}/{}", PUBLIC_UPLOADS_PREFIX, STUDENT_IMAGE_DIR, file_name))
    }

    async fn remove(&self, public_path: &str) -> Result<(), DomainError> {
        let path = match self.resolve(public_path) {
            Some(path) => path,
            None => {
                tracing::warn!(path = public_path, "Refusing to remove image outside upload directory");
                return Ok(());
            }
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfrastructureError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ImageUpload {
        ImageUpload {
            file_name: Some("me.png".to_string()),
            content_type: "image/png".to_string(),
            bytes: vec![137, 80, 78, 71],
        }
    }

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path());

        let public_path = storage.store(&upload()).await.unwrap();
        assert!(public_path.starts_with("/uploads/students/"));
        assert!(public_path.ends_with(".png"));

        let file = storage.resolve(&public_path).unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), vec![137, 80, 78, 71]);

        storage.remove(&public_path).await.unwrap();
        assert!(!file.exists());

        // Removing twice is fine
        storage.remove(&public_path).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_names_file_by_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path());

        let disguised = ImageUpload {
            file_name: Some("x.html".to_string()),
            content_type: "image/png".to_string(),
            bytes: b"<script>alert(1)</script>".to_vec(),
        };
        let public_path = storage.store(&disguised).await.unwrap();
        assert!(public_path.ends_with(".png"));
        assert!(!public_path.ends_with(".html"));
    }

    #[tokio::test]
    async fn test_store_rejects_svg() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path());

        let svg = ImageUpload {
            file_name: Some("logo.svg".to_string()),
            content_type: "image/svg+xml".to_string(),
            bytes: b"<svg onload=\"alert(1)\"/>".to_vec(),
        };
        let result = storage.store(&svg).await;
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::UnsupportedFileType { .. }))
        ));
        assert!(!dir.path().join(STUDENT_IMAGE_DIR).exists());
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let storage = LocalImageStorage::new("/srv/uploads");

        assert!(storage.resolve("/uploads/../etc/passwd").is_none());
        assert!(storage.resolve("/elsewhere/a.png").is_none());
        assert!(storage.resolve("/uploads/").is_none());
        assert_eq!(
            storage.resolve("/uploads/students/a.png"),
            Some(PathBuf::from("/srv/uploads/students/a.png"))
        );
    }
}
