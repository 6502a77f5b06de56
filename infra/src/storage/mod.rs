//! Filesystem storage for uploaded images

mod local_image_storage;

pub use local_image_storage::{LocalImageStorage, PUBLIC_UPLOADS_PREFIX, STUDENT_IMAGE_DIR};
