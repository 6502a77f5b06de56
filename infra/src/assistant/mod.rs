//! Chat backend client for the assistant endpoint

mod http_client;

pub use http_client::HttpAssistantClient;
