//! Type definitions shared by the API and its clients
//!
//! - `response` - Message and health check responses

pub mod response;

pub use response::{HealthResponse, MessageResponse};
