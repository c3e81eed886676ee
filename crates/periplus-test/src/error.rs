//! Test error types.

use thiserror::Error;

/// Errors raised while building requests or reading responses.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request URI did not parse.
    #[error("invalid request URI: {0}")]
    InvalidUri(String),

    /// The query pairs did not encode.
    #[error("failed to encode query string: {0}")]
    QueryEncode(#[from] serde_urlencoded::ser::Error),

    /// The response body was not text.
    #[error("unreadable response body: {0}")]
    Body(String),

    /// The response body did not decode as JSON.
    #[error("failed to decode JSON body: {0}")]
    Json(#[from] serde_json::Error),
}
