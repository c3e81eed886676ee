//! JSON body parsing stage.
//!
//! Registration prepends this stage to a route's chain whenever the
//! route declares a body schema, so the raw bytes are parsed exactly
//! once before the validation stage needs them.
//!
//! # Chain Position
//!
//! ```text
//! Request → [JsonBody] → before → Validation → Handlers → after
//! ```

use periplus_core::{
    BoxFuture, Middleware, Next, PeriplusError, PeriplusResult, RouteContext, Section,
    ValidatedRequest,
};
use periplus_schema::{codes, ValidationFailure, ValidationIssue};
use serde_json::{Map, Value};

/// Parses the buffered request body as JSON into the context.
///
/// An empty body parses to an empty object, matching what a handler
/// sees when the client sends no payload at all. Malformed JSON fails
/// the request as an invalid body before any schema runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyStage;

impl JsonBodyStage {
    /// Creates the stage.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for JsonBodyStage {
    fn name(&self) -> &'static str {
        "json_body"
    }

    fn handle<'a>(
        &'a self,
        ctx: &'a mut RouteContext,
        request: ValidatedRequest,
        next: Next<'a>,
    ) -> BoxFuture<'a, PeriplusResult<()>> {
        Box::pin(async move {
            let parsed = if ctx.body().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_json::from_slice(ctx.body()).map_err(|err| PeriplusError::InvalidRequest {
                    section: Section::Body,
                    failure: ValidationFailure::new(vec![ValidationIssue::new(
                        "",
                        codes::INVALID_JSON,
                        format!("invalid JSON: {err}"),
                    )]),
                })?
            };
            ctx.set_parsed_body(parsed);
            next.run(ctx, request).await
        })
    }
}
