//! Error types for Periplus.
//!
//! Only two failures belong to the toolkit itself: a request section
//! failing validation and a response body failing validation. Everything
//! else that escapes a handler or a user middleware is carried through
//! [`PeriplusError::Other`] without being reshaped, so applications see
//! exactly the error they raised.

use http::StatusCode;
use periplus_schema::{ValidationFailure, ValidationIssue};
use thiserror::Error;

/// Result type alias using [`PeriplusError`].
pub type PeriplusResult<T> = Result<T, PeriplusError>;

/// The request sections that are validated independently.
///
/// [`Section::all`] lists them in validation order; the first section
/// with a failing schema aborts the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// HTTP request headers.
    Headers,
    /// Path parameters.
    Params,
    /// Query string parameters.
    Query,
    /// JSON request body.
    Body,
}

impl Section {
    /// Returns the section name as used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Headers => "headers",
            Self::Params => "params",
            Self::Query => "query",
            Self::Body => "body",
        }
    }

    /// Returns all sections in validation order.
    #[must_use]
    pub const fn all() -> [Section; 4] {
        [Self::Headers, Self::Params, Self::Query, Self::Body]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Standard error type for Periplus.
///
/// # Example
///
/// ```
/// use periplus_core::{PeriplusError, PeriplusResult};
///
/// fn load_ship(id: &str) -> PeriplusResult<String> {
///     if id.is_empty() {
///         return Err(PeriplusError::other(std::io::Error::new(
///             std::io::ErrorKind::NotFound,
///             "no such ship",
///         )));
///     }
///     Ok(format!("ship {id}"))
/// }
///
/// assert!(load_ship("").is_err());
/// ```
#[derive(Error, Debug)]
pub enum PeriplusError {
    /// A request section failed schema validation.
    ///
    /// Raised before any handler runs; the remaining sections are not
    /// validated.
    #[error("invalid request {section}: {failure}")]
    InvalidRequest {
        /// The section that failed.
        section: Section,
        /// The collected validation issues.
        #[source]
        failure: ValidationFailure,
    },

    /// The response body failed the declared response schema.
    ///
    /// Raised after the handler chain completes, only on routes that
    /// opted into response validation.
    #[error("invalid response: {failure}")]
    InvalidResponse {
        /// The collected validation issues.
        #[source]
        failure: ValidationFailure,
    },

    /// An error raised by a handler or user middleware.
    ///
    /// Carried through unmodified so callers can downcast to whatever
    /// they threw.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl PeriplusError {
    /// Wraps an application error for transparent passthrough.
    #[must_use]
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(error))
    }

    /// Returns the HTTP status code conventionally paired with this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidResponse { .. } | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a stable machine-readable code for error envelopes.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidResponse { .. } => "invalid_response",
            Self::Other(_) => "internal",
        }
    }

    /// Returns the validation issues behind this error, if it is one of
    /// the two validation failures.
    #[must_use]
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::InvalidRequest { failure, .. } | Self::InvalidResponse { failure } => {
                Some(failure.issues())
            }
            Self::Other(_) => None,
        }
    }
}
