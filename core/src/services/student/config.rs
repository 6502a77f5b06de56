use sm_shared::config::UploadConfig;

/// Configuration for the student service
#[derive(Debug, Clone)]
pub struct StudentServiceConfig {
    /// Largest accepted image upload in bytes
    pub max_image_bytes: usize,
}

impl Default for StudentServiceConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

impl From<&UploadConfig> for StudentServiceConfig {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_image_bytes: config.max_image_bytes,
        }
    }
}
