//! Error types for the Loops API client.
//!
//! # Design
//! `LoopsError` separates failures the caller caused (`InvalidArgument`,
//! raised before anything touches the network) from failures the server
//! reported (`RateLimited`, `Api`) and from failures below HTTP
//! (`Transport`). Transport errors are carried unchanged as the error source
//! so callers can downcast to the backend's own type.

use serde_json::Value;
use thiserror::Error;

/// Body recorded on `ApiError` for statuses the API does not document.
pub const UNEXPECTED_ERROR_BODY: &str = "Unexpected error occurred";

/// Boxed error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LoopsError>;

/// Errors returned by `LoopsClient` and its resource modules.
#[derive(Debug, Error)]
pub enum LoopsError {
    /// A local precondition failed; no request was sent.
    #[error("{0}")]
    InvalidArgument(String),

    /// The server returned 429.
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// The server returned any other non-200 status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The request body could not be encoded as JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The server returned 200 with a body that is not JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    /// The client could not be configured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LoopsError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        LoopsError::InvalidArgument(message.into())
    }
}

/// A 429 response. Both counters are kept exactly as the server sent them;
/// a missing header yields an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Rate limit of {limit} requests per second exceeded.")]
pub struct RateLimitError {
    pub limit: String,
    pub remaining: String,
}

/// A non-200, non-429 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    status: u16,
    body: String,
    message: String,
}

impl ApiError {
    /// Build an error from a status and the raw response body.
    ///
    /// The message gains a `": <message>"` suffix when the body is a JSON
    /// object with a `message` field. Any other body leaves the bare message.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let mut message = format!("API request failed with status {status}");
        if let Some(detail) = message_field(&body) {
            message.push_str(": ");
            message.push_str(&detail);
        }
        Self {
            status,
            body,
            message,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw response body, unparsed.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The body parsed as JSON, or `None` when it is not JSON. `body()`
    /// always has the raw text.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

fn message_field(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("message")? {
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
