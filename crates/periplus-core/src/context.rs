//! Per-route request context.
//!
//! A [`RouteContext`] is built by the dispatcher for each matched request
//! and handed to every stage of the route's chain. It carries the raw
//! request data on one side and the accumulating [`ResponseState`] on the
//! other; handlers read from the first and write to the second.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use http_body_util::Full;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use periplus_router::Params;

use crate::error::{PeriplusError, PeriplusResult};
use crate::types::Response;

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which makes it ideal for request tracking
/// and log correlation.
///
/// # Example
///
/// ```
/// use periplus_core::RequestId;
///
/// let id = RequestId::new();
/// println!("request: {id}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// The response being assembled for a request.
///
/// Nothing is sent until the whole chain finishes, so later stages may
/// overwrite what earlier stages set. Status resolution on completion
/// follows the usual convention: an explicitly set status always wins;
/// otherwise a response with a body is `200 OK` and a response without
/// one is `404 Not Found`.
#[derive(Debug, Clone, Default)]
pub struct ResponseState {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ResponseState {
    /// Creates an empty response state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicitly set status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Sets the status explicitly.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// The response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The response body, if one has been set.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Sets the raw response body.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    /// Serializes a value as the JSON response body.
    ///
    /// Also sets the `content-type` header to `application/json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn set_json<T: Serialize>(&mut self, value: &T) -> PeriplusResult<()> {
        let body = serde_json::to_vec(value).map_err(PeriplusError::other)?;
        self.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        self.body = Some(Bytes::from(body));
        Ok(())
    }

    /// The response body parsed as JSON, if it parses.
    #[must_use]
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_ref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }

    /// Finalizes the state into an HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response {
        let status = self.status.unwrap_or(if self.body.is_some() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        });

        let mut response = http::Response::new(Full::new(self.body.unwrap_or_default()));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Per-request context that flows through a route's chain.
///
/// # Example
///
/// ```
/// use periplus_core::RouteContext;
/// use http::Method;
///
/// let ctx = RouteContext::new(Method::GET, "/ships/42");
/// println!("processing request: {}", ctx.request_id());
/// ```
#[derive(Debug)]
pub struct RouteContext {
    /// Unique identifier for this request.
    request_id: RequestId,

    /// Request method.
    method: Method,

    /// Concrete request path, not the route template.
    path: String,

    /// Request headers as received.
    headers: HeaderMap,

    /// Raw query string, without the leading `?`.
    query: Option<String>,

    /// Path parameters extracted by the router.
    params: Params,

    /// Raw request body.
    body: Bytes,

    /// Body parsed as JSON, once a body stage has run.
    parsed_body: Option<Value>,

    /// The response being assembled.
    response: ResponseState,
}

impl RouteContext {
    /// Creates a context with a fresh request ID and empty request data.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: None,
            params: Params::new(),
            body: Bytes::new(),
            parsed_body: None,
            response: ResponseState::new(),
        }
    }

    /// Creates a bare `GET /` context for tests.
    #[must_use]
    pub fn mock() -> Self {
        Self::new(Method::GET, "/")
    }

    /// Replaces the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the raw query string.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the extracted path parameters.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the concrete request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as text, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the extracted path parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the raw request body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body parsed as JSON, once a body stage has run.
    #[must_use]
    pub const fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    /// Stores the parsed JSON body.
    pub fn set_parsed_body(&mut self, body: Value) {
        self.parsed_body = Some(body);
    }

    /// Returns the response being assembled.
    #[must_use]
    pub const fn response(&self) -> &ResponseState {
        &self.response
    }

    /// Mutable access to the response being assembled.
    pub fn response_mut(&mut self) -> &mut ResponseState {
        &mut self.response
    }

    /// Consumes the context and finalizes the response.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response.into_response()
    }
}
