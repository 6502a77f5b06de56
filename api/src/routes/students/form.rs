//! Multipart decoding for student create/update requests.

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;

use sm_core::domain::entities::student::{ImageUpload, StudentForm};
use sm_core::errors::ValidationError;
use sm_shared::errors::error_codes;

use crate::handlers::error::ApiError;

/// Name of the file part carrying the student photo
pub const IMAGE_FIELD: &str = "image";

const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// Text fields and optional photo of one submission
#[derive(Debug, Default)]
pub struct StudentSubmission {
    pub form: StudentForm,
    pub image: Option<ImageUpload>,
}

/// Read every part of a multipart body.
///
/// Unknown text fields are ignored. An `image` part without a file name and
/// without content counts as "no new image", which is what browsers send for
/// an untouched file input.
pub async fn read_submission(
    mut payload: Multipart,
    max_image_bytes: usize,
) -> Result<StudentSubmission, ApiError> {
    let mut submission = StudentSubmission::default();

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let file_name = disposition.get_filename().map(str::to_string);

        if name == IMAGE_FIELD {
            let content_type = field
                .content_type()
                .map(|mime| mime.essence_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let bytes = read_field(&mut field, max_image_bytes)
                .await?
                .ok_or(ValidationError::FileTooLarge {
                    max_bytes: max_image_bytes,
                })?;

            if bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
                continue;
            }

            submission.image = Some(ImageUpload {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES)
            .await?
            .ok_or_else(|| {
                ApiError::bad_request(error_codes::VALIDATION_ERROR, format!("Field {} is too long", name))
            })?;
        let value = String::from_utf8(bytes).map_err(|_| ValidationError::InvalidFormat {
            field: name.clone(),
        })?;

        if !submission.form.set_field(&name, value) {
            log::debug!("Ignoring unknown student form field: {}", name);
        }
    }

    Ok(submission)
}

/// Collect a field's bytes; `None` once it grows past `limit`
async fn read_field(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}

fn malformed(error: actix_multipart::MultipartError) -> ApiError {
    log::debug!("Malformed multipart body: {}", error);
    ApiError::bad_request(error_codes::VALIDATION_ERROR, "Invalid form data")
}
