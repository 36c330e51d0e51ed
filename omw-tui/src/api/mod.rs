mod client;
pub mod dto;

pub use client::OmwClient;

/// Settled outcome of one dispatch. Never both a payload and an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Success(serde_json::Value),
    Failure(String),
}
