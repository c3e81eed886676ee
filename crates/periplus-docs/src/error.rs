//! Error type for documentation generation.

use thiserror::Error;

/// Errors that can occur while writing a route into the OpenAPI document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The derived operation could not be serialized to JSON.
    #[error("failed to serialize operation: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for documentation generation.
pub type DocsResult<T> = Result<T, DocsError>;
