//! Request and response validation stage.
//!
//! This stage sits between the user's `before` middleware and the
//! route's handlers. On the way in it parses each declared request
//! section against its schema and attaches the typed payload the rest
//! of the chain receives; on the way out it optionally validates the
//! response body the handlers produced.
//!
//! # Chain Position
//!
//! ```text
//! Request → JsonBody → before → [Validation] → Handlers → after
//! ```
//!
//! Sections are validated in a fixed order: headers, then path params,
//! then query, then body. The first failing section aborts the request
//! before any handler runs. Sections without a declared schema reach
//! handlers as `null`, never as raw request data.

use http::HeaderMap;
use serde_json::{Map, Value};

use periplus_core::{
    BoxFuture, Middleware, Next, Params, PeriplusError, PeriplusResult, RequestSchemas,
    ResponseExpectation, RouteContext, Section, ValidatedRequest,
};

/// Validates requests against a route's declared schemas.
///
/// Headers, params, and query values arrive as strings, so those
/// sections are parsed with coercion enabled; the body was parsed from
/// JSON and is matched strictly.
///
/// Response validation only runs when the route declares a response
/// schema and explicitly opts in. It happens after the handlers have
/// already written status and body, so a failure reports a contract
/// violation rather than preventing one.
#[derive(Debug, Clone)]
pub struct ValidationStage {
    request: RequestSchemas,
    response: ResponseExpectation,
}

impl ValidationStage {
    /// Creates a stage from a route's request schemas and response
    /// expectation.
    #[must_use]
    pub fn new(request: RequestSchemas, response: ResponseExpectation) -> Self {
        Self { request, response }
    }

    /// Parses every declared section, in validation order.
    fn validate_request(&self, ctx: &RouteContext) -> PeriplusResult<ValidatedRequest> {
        let mut data = ValidatedRequest::empty();
        for section in Section::all() {
            let Some(schema) = self.request.section(section) else {
                continue;
            };
            let raw = raw_section(ctx, section);
            let parsed = match section {
                Section::Body => schema.parse(&raw),
                _ => schema.parse_coercing(&raw),
            };
            match parsed {
                Ok(value) => data.set_section(section, value),
                Err(failure) => {
                    tracing::debug!(
                        section = section.name(),
                        %failure,
                        "request section failed validation"
                    );
                    return Err(PeriplusError::InvalidRequest { section, failure });
                }
            }
        }
        Ok(data)
    }

    /// Validates the response body the chain produced, if the route
    /// opted in.
    ///
    /// A missing or non-JSON body validates as `null`.
    fn validate_response(&self, ctx: &RouteContext) -> PeriplusResult<()> {
        if !self.response.validate {
            return Ok(());
        }
        let Some(schema) = &self.response.schema else {
            return Ok(());
        };

        let body = ctx.response().body_json().unwrap_or(Value::Null);
        if let Err(failure) = schema.parse(&body) {
            tracing::debug!(%failure, "response body failed validation");
            return Err(PeriplusError::InvalidResponse { failure });
        }
        Ok(())
    }
}

impl Middleware for ValidationStage {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn handle<'a>(
        &'a self,
        ctx: &'a mut RouteContext,
        _request: ValidatedRequest,
        next: Next<'a>,
    ) -> BoxFuture<'a, PeriplusResult<()>> {
        Box::pin(async move {
            let data = self.validate_request(ctx)?;

            // Declared status goes on before the handlers so they can
            // still override it.
            if let Some(status) = self.response.status {
                ctx.response_mut().set_status(status);
            }

            next.run(ctx, data).await?;
            self.validate_response(ctx)
        })
    }
}

/// Collects the raw value a section's schema parses.
fn raw_section(ctx: &RouteContext, section: Section) -> Value {
    match section {
        Section::Headers => headers_value(ctx.headers()),
        Section::Params => params_value(ctx.params()),
        Section::Query => query_value(ctx.query()),
        Section::Body => ctx.parsed_body().cloned().unwrap_or(Value::Null),
    }
}

/// Header names come back lowercased; values that are not UTF-8 are
/// replaced lossily rather than dropped.
fn headers_value(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        let text = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.insert(name.as_str().to_string(), Value::String(text));
    }
    Value::Object(map)
}

fn params_value(params: &Params) -> Value {
    let mut map = Map::new();
    for (name, value) in params.iter() {
        map.insert(name.to_string(), Value::String(value.to_string()));
    }
    Value::Object(map)
}

/// Repeated query keys keep the last value.
fn query_value(query: Option<&str>) -> Value {
    let mut map = Map::new();
    if let Some(query) = query {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => {
                for (name, value) in pairs {
                    map.insert(name, Value::String(value));
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "query string did not decode, validating empty map");
            }
        }
    }
    Value::Object(map)
}
