//! Student record route handlers
//!
//! Listing is public; create, update and delete need a session and the
//! latter two are limited to the record's owner.

pub mod form;
pub mod handlers;

pub use handlers::{create_student, delete_student, list_students, update_student};
