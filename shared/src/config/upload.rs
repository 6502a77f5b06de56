//! Image upload configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where uploaded images live and how large they may be
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Directory served under `/uploads`
    pub dir: PathBuf,

    /// Maximum accepted image size in bytes
    pub max_image_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_image_bytes: 5 * 1024 * 1024, // 5 MB
        }
    }
}

impl UploadConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            max_image_bytes: std::env::var("UPLOAD_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
        }
    }
}
