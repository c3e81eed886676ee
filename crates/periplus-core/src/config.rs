//! Declarative route configuration.
//!
//! A [`RouteConfig`] describes one route's contract: which request
//! sections to validate, what the response should look like, the user
//! middleware to run around the handlers, and how the route appears in
//! the OpenAPI document. The handlers themselves are not part of the
//! config; they are passed alongside it at registration.
//!
//! # Example
//!
//! ```ignore
//! let config = RouteConfig::new()
//!     .with_request(
//!         RequestSchemas::new()
//!             .with_params(Schema::object().required_property("shipId")),
//!     )
//!     .with_response(
//!         ResponseExpectation::new()
//!             .with_status(StatusCode::OK)
//!             .with_schema(Schema::object().property("name", Schema::string())),
//!     )
//!     .with_docs(DocsConfig::auto(document.clone()));
//! ```

use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use periplus_openapi::SharedDocument;
use periplus_schema::Schema;

use crate::chain::Middleware;
use crate::error::Section;

/// Schemas for the request sections a route validates.
///
/// A `None` section is not validated and reaches handlers as `null`.
#[derive(Debug, Clone, Default)]
pub struct RequestSchemas {
    /// Schema for the request headers.
    pub headers: Option<Schema>,
    /// Schema for the path parameters.
    pub params: Option<Schema>,
    /// Schema for the query parameters.
    pub query: Option<Schema>,
    /// Schema for the JSON body.
    pub body: Option<Schema>,
}

impl RequestSchemas {
    /// Creates a config that validates nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the headers schema.
    #[must_use]
    pub fn with_headers(mut self, schema: Schema) -> Self {
        self.headers = Some(schema);
        self
    }

    /// Sets the path parameters schema.
    #[must_use]
    pub fn with_params(mut self, schema: Schema) -> Self {
        self.params = Some(schema);
        self
    }

    /// Sets the query parameters schema.
    #[must_use]
    pub fn with_query(mut self, schema: Schema) -> Self {
        self.query = Some(schema);
        self
    }

    /// Sets the body schema.
    #[must_use]
    pub fn with_body(mut self, schema: Schema) -> Self {
        self.body = Some(schema);
        self
    }

    /// The schema declared for a section, if any.
    #[must_use]
    pub const fn section(&self, section: Section) -> Option<&Schema> {
        match section {
            Section::Headers => self.headers.as_ref(),
            Section::Params => self.params.as_ref(),
            Section::Query => self.query.as_ref(),
            Section::Body => self.body.as_ref(),
        }
    }

    /// Whether no section declares a schema.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.headers.is_none()
            && self.params.is_none()
            && self.query.is_none()
            && self.body.is_none()
    }
}

/// What a route promises about its response.
#[derive(Debug, Clone, Default)]
pub struct ResponseExpectation {
    /// Status the route responds with; pre-set before handlers run and
    /// used as the documented response key.
    pub status: Option<StatusCode>,
    /// Schema for the JSON response body.
    pub schema: Option<Schema>,
    /// Names of additional response headers worth documenting.
    pub headers: Vec<String>,
    /// Whether to validate the response body against the schema after
    /// the chain completes.
    pub validate: bool,
}

impl ResponseExpectation {
    /// Creates an expectation that promises nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declared status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the response body schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Adds a documented response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>) -> Self {
        self.headers.push(name.into());
        self
    }

    /// Turns on response body validation.
    ///
    /// Only takes effect when a schema is also set.
    #[must_use]
    pub const fn validated(mut self) -> Self {
        self.validate = true;
        self
    }
}

/// How a route contributes to the OpenAPI document.
#[derive(Debug, Clone)]
pub enum DocsDirective {
    /// Derive the operation from the route's schemas.
    Auto(AutoDocs),
    /// Insert this value as the operation, exactly as given.
    Custom(Value),
    /// Leave the document untouched.
    Hidden,
}

/// Extra inputs for a derived operation.
#[derive(Debug, Clone, Default)]
pub struct AutoDocs {
    /// Tags for grouping.
    pub tags: Vec<String>,
    /// Description for the generated response entry. Empty when absent.
    pub description: Option<String>,
}

impl AutoDocs {
    /// Creates empty inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the description used on the generated response entry.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The documentation half of a route config: which document to write
/// into and what to write.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// The shared document registrations write into.
    pub document: SharedDocument,
    /// What to write for this route.
    pub directive: DocsDirective,
}

impl DocsConfig {
    /// Derives the operation from the route's schemas.
    #[must_use]
    pub fn auto(document: SharedDocument) -> Self {
        Self {
            document,
            directive: DocsDirective::Auto(AutoDocs::new()),
        }
    }

    /// Derives the operation with extra tags and description.
    #[must_use]
    pub fn auto_with(document: SharedDocument, extra: AutoDocs) -> Self {
        Self {
            document,
            directive: DocsDirective::Auto(extra),
        }
    }

    /// Inserts a hand-written operation verbatim.
    #[must_use]
    pub fn custom(document: SharedDocument, operation: Value) -> Self {
        Self {
            document,
            directive: DocsDirective::Custom(operation),
        }
    }

    /// Registers the route without documenting it.
    #[must_use]
    pub fn hidden(document: SharedDocument) -> Self {
        Self {
            document,
            directive: DocsDirective::Hidden,
        }
    }
}

/// One route's contract: schemas, surrounding middleware, and docs.
///
/// The route's chain runs in a fixed shape. A JSON body stage comes
/// first when a body schema is declared, then the `before` middleware,
/// then validation, then the handlers supplied at registration, then
/// the `after` middleware.
pub struct RouteConfig {
    /// Request section schemas.
    pub request: RequestSchemas,
    /// Response expectation.
    pub response: ResponseExpectation,
    /// Middleware that runs before validation.
    pub before: Vec<Arc<dyn Middleware>>,
    /// Middleware that runs after the handlers.
    pub after: Vec<Arc<dyn Middleware>>,
    /// Documentation directive, if the route is documented.
    pub docs: Option<DocsConfig>,
}

impl RouteConfig {
    /// Creates a config with no schemas, no stages, and no docs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request: RequestSchemas::new(),
            response: ResponseExpectation::new(),
            before: Vec::new(),
            after: Vec::new(),
            docs: None,
        }
    }

    /// Sets the request schemas.
    #[must_use]
    pub fn with_request(mut self, request: RequestSchemas) -> Self {
        self.request = request;
        self
    }

    /// Sets the response expectation.
    #[must_use]
    pub fn with_response(mut self, response: ResponseExpectation) -> Self {
        self.response = response;
        self
    }

    /// Appends a middleware that runs before validation.
    ///
    /// These stages see an empty payload; the request has not been
    /// validated yet when they run.
    #[must_use]
    pub fn use_before(mut self, middleware: impl Middleware) -> Self {
        self.before.push(Arc::new(middleware));
        self
    }

    /// Appends a middleware that runs after the handlers.
    #[must_use]
    pub fn use_after(mut self, middleware: impl Middleware) -> Self {
        self.after.push(Arc::new(middleware));
        self
    }

    /// Sets the documentation directive.
    #[must_use]
    pub fn with_docs(mut self, docs: DocsConfig) -> Self {
        self.docs = Some(docs);
        self
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::new()
    }
}
