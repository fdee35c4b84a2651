//! Error type for LLM operations.

use thiserror::Error;

/// Error from an LLM backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The reply body was not the JSON shape the API documents.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reply carried no text content.
    #[error("empty response from model")]
    EmptyResponse,

    /// The backend cannot carry this request content.
    #[error("unsupported request content: {0}")]
    Unsupported(&'static str),
}
