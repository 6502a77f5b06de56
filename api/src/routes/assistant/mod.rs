//! Assistant route handler

pub mod ask;

pub use ask::ask;
