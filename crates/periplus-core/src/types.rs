//! HTTP type aliases used throughout the toolkit.
//!
//! Bodies are fully buffered; routes validate complete JSON documents,
//! so there is nothing to stream.

use bytes::Bytes;
use http_body_util::Full;

/// The HTTP request type routes are dispatched from.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type routes produce.
pub type Response = http::Response<Full<Bytes>>;
