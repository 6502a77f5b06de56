//! Assistant question answering over the student table

mod client;
mod service;

#[cfg(test)]
mod tests;

pub use client::{AssistantClient, AssistantReply, AssistantRequest};
pub use service::{AssistantService, FALLBACK_ANSWER};
