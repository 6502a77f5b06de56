//! Student record entity and the inputs used to create or change one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Student record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
    /// Public path of the uploaded image, e.g. `/uploads/students/<file>`
    pub image: Option<String>,
    /// Id of the owning user
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Listing row: a student together with its owner's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentWithOwner {
    #[serde(flatten)]
    pub student: Student,
    pub owner_name: Option<String>,
}

/// Validated student fields, shared by create and update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
}

/// Raw text fields as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
}

impl StudentForm {
    /// Validate and normalize the submitted fields.
    ///
    /// Blank optional fields become `None`; `name` is required and `age`, when
    /// given, must be a non-negative integer.
    pub fn validate(self) -> Result<NewStudent, ValidationError> {
        let name = clean(self.name).ok_or_else(|| ValidationError::RequiredField {
            field: "name".to_string(),
        })?;

        let age = match clean(self.age) {
            Some(raw) => {
                let parsed = raw.parse::<i32>().map_err(|_| ValidationError::InvalidFormat {
                    field: "age".to_string(),
                })?;
                if parsed < 0 {
                    return Err(ValidationError::InvalidFormat {
                        field: "age".to_string(),
                    });
                }
                Some(parsed)
            }
            None => None,
        };

        Ok(NewStudent {
            name,
            age,
            email: clean(self.email),
            phone: clean(self.phone),
            gender: clean(self.gender),
            course: clean(self.course),
            address: clean(self.address),
        })
    }

    /// Set a named field; unknown names are ignored. Returns whether the name
    /// was recognised.
    pub fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "age" => &mut self.age,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "gender" => &mut self.gender,
            "course" => &mut self.course,
            "address" => &mut self.address,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Image file received with a create/update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client-side file name; kept for logging only, never used on disk
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Accepted image types and the extension each is stored under
const IMAGE_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

impl ImageUpload {
    pub fn is_image(&self) -> bool {
        self.extension().is_some()
    }

    /// Extension to store the image under, derived from the content type
    /// alone. `None` for anything outside the accepted raster formats.
    pub fn extension(&self) -> Option<&'static str> {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        IMAGE_TYPES
            .iter()
            .find(|(content_type, _)| *content_type == essence)
            .map(|(_, ext)| *ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: &str) -> StudentForm {
        StudentForm {
            name: Some(name.to_string()),
            age: Some(age.to_string()),
            course: Some("  ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let student = form(" Bob ", "21").validate().unwrap();

        assert_eq!(student.name, "Bob");
        assert_eq!(student.age, Some(21));
        assert_eq!(student.course, None);
    }

    #[test]
    fn test_validate_requires_name() {
        let err = form("  ", "21").validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::RequiredField {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_age() {
        assert!(form("Bob", "twenty").validate().is_err());
        assert!(form("Bob", "-1").validate().is_err());
        assert_eq!(form("Bob", "").validate().unwrap().age, None);
    }

    #[test]
    fn test_set_field() {
        let mut form = StudentForm::default();
        assert!(form.set_field("course", "Physics".to_string()));
        assert!(!form.set_field("image", "x".to_string()));
        assert_eq!(form.course.as_deref(), Some("Physics"));
    }

    #[test]
    fn test_image_extension() {
        let mut upload = ImageUpload {
            file_name: Some("Photo.JPG".to_string()),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(upload.is_image());
        assert_eq!(upload.extension(), Some("jpg"));

        upload.file_name = Some("../../etc/passwd".to_string());
        upload.content_type = "Image/PNG; charset=binary".to_string();
        assert_eq!(upload.extension(), Some("png"));

        upload.file_name = None;
        upload.content_type = "text/plain".to_string();
        assert!(!upload.is_image());
    }

    #[test]
    fn test_extension_ignores_client_file_name() {
        let upload = ImageUpload {
            file_name: Some("evil.html".to_string()),
            content_type: "image/png".to_string(),
            bytes: b"<script>alert(1)</script>".to_vec(),
        };
        assert_eq!(upload.extension(), Some("png"));
    }

    #[test]
    fn test_scriptable_image_types_rejected() {
        for content_type in ["image/svg+xml", "image/x-icon", "image/", "text/html"] {
            let upload = ImageUpload {
                file_name: Some("logo.svg".to_string()),
                content_type: content_type.to_string(),
                bytes: vec![1],
            };
            assert!(!upload.is_image(), "{} should be rejected", content_type);
            assert_eq!(upload.extension(), None);
        }
    }

    #[test]
    fn test_listing_row_flattens_student() {
        let row = StudentWithOwner {
            student: Student {
                id: 1,
                name: "Bob".to_string(),
                age: None,
                email: None,
                phone: None,
                gender: None,
                course: Some("Math".to_string()),
                address: None,
                image: None,
                created_by: 3,
                created_at: Utc::now(),
            },
            owner_name: Some("Alice".to_string()),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["name"], "Bob");
        assert_eq!(json["owner_name"], "Alice");
        assert_eq!(json["created_by"], 3);
    }
}
