//! Student records service
//!
//! Anyone may list students; creating requires an identity, and updating or
//! deleting additionally requires owning the record.

mod config;
mod service;
mod storage;

#[cfg(test)]
mod tests;

pub use config::StudentServiceConfig;
pub use service::StudentService;
pub use storage::ImageStorage;
