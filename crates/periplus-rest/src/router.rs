//! The dispatching router.
//!
//! [`Router`] owns the route table and one middleware chain per route.
//! Dispatch buffers the request body, builds the per-request context,
//! and runs the matched chain; the response is whatever the chain left
//! in the context's response state.

use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use http_body_util::{BodyExt, Full};

use periplus_core::{
    Middleware, Next, PeriplusError, PeriplusResult, Request, Response, ResponseState,
    RouteContext, ValidatedRequest,
};
use periplus_router::PathRouter;

/// A method-and-path router that runs each route's middleware chain.
///
/// Routes are added through [`rest`](crate::rest); re-registering the
/// same method and pattern replaces the previous chain in place.
#[derive(Default)]
pub struct Router {
    paths: PathRouter,
    chains: Vec<Vec<Arc<dyn Middleware>>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.paths.len())
            .finish()
    }
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Adds or replaces the route for a method and pattern.
    pub(crate) fn register(
        &mut self,
        method: Method,
        pattern: &str,
        chain: Vec<Arc<dyn Middleware>>,
    ) {
        let route_id = self.paths.insert(method, pattern);
        if route_id == self.chains.len() {
            self.chains.push(chain);
        } else {
            self.chains[route_id] = chain;
        }
    }

    /// Runs the matched route's chain and returns the response it
    /// produced.
    ///
    /// Unmatched requests resolve to an empty `404` response rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// Returns the toolkit's validation errors and, unmodified, any
    /// error a handler or middleware raised.
    pub async fn dispatch(&self, request: Request) -> PeriplusResult<Response> {
        let (parts, body) = request.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(never) => match never {},
        };

        let Some(matched) = self.paths.lookup(&parts.method, parts.uri.path()) else {
            tracing::debug!(method = %parts.method, path = parts.uri.path(), "no route matched");
            return Ok(ResponseState::new().into_response());
        };
        let route_id = matched.route_id();

        let mut ctx = RouteContext::new(parts.method, parts.uri.path())
            .with_headers(parts.headers)
            .with_params(matched.into_params())
            .with_body(body);
        if let Some(query) = parts.uri.query() {
            ctx = ctx.with_query(query);
        }

        let mut next = Next::terminal();
        for middleware in self.chains[route_id].iter().rev() {
            next = Next::new(middleware.as_ref(), next);
        }
        next.run(&mut ctx, ValidatedRequest::empty()).await?;

        Ok(ctx.into_response())
    }

    /// Dispatches and renders any error as the standard JSON envelope.
    ///
    /// Use this when wiring the router directly into a server loop;
    /// use [`dispatch`](Self::dispatch) to observe errors yourself.
    pub async fn respond(&self, request: Request) -> Response {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(%error, "request failed, rendering error envelope");
                error_response(&error)
            }
        }
    }
}

/// Renders an error as a JSON envelope response.
///
/// The body carries a stable code and the display message; the two
/// validation failures also carry their issue list.
#[must_use]
pub fn error_response(error: &PeriplusError) -> Response {
    let message = error.to_string();
    let envelope = match error.issues() {
        Some(issues) => serde_json::json!({
            "error": {"code": error.code(), "message": message, "issues": issues}
        }),
        None => serde_json::json!({
            "error": {"code": error.code(), "message": message}
        }),
    };

    let mut response = Response::new(Full::new(Bytes::from(envelope.to_string())));
    *response.status_mut() = error.status_code();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use periplus_core::{handler_fn, Section};
    use periplus_schema::{ValidationFailure, ValidationIssue};
    use serde_json::{json, Value};

    fn request(method: Method, uri: &str, body: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ok_chain(payload: &'static str) -> Vec<Arc<dyn Middleware>> {
        vec![Arc::new(handler_fn("ok", move |ctx, _data| {
            Box::pin(async move { ctx.response_mut().set_json(&json!({"from": payload})) })
        }))]
    }

    #[tokio::test]
    async fn test_unmatched_request_is_an_empty_404() {
        let router = Router::new();

        let response = router
            .dispatch(request(Method::GET, "/nowhere", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_matched_chain_builds_the_response() {
        let mut router = Router::new();
        router.register(Method::GET, "/ships", ok_chain("list"));

        let response = router
            .dispatch(request(Method::GET, "/ships", ""))
            .await
            .unwrap();

        // No explicit status plus a body defaults to 200.
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"from": "list"}));
    }

    #[tokio::test]
    async fn test_reregistration_replaces_the_chain() {
        let mut router = Router::new();
        router.register(Method::GET, "/ships", ok_chain("first"));
        router.register(Method::GET, "/ships", ok_chain("second"));

        assert_eq!(router.len(), 1);
        let response = router
            .dispatch(request(Method::GET, "/ships", ""))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"from": "second"}));
    }

    #[tokio::test]
    async fn test_handler_errors_propagate_through_dispatch() {
        let mut router = Router::new();
        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(handler_fn("boom", |_ctx, _data| {
            Box::pin(async move {
                Err(PeriplusError::other(std::io::Error::other("disk on fire")))
            })
        }))];
        router.register(Method::GET, "/ships", chain);

        let err = router
            .dispatch(request(Method::GET, "/ships", ""))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "disk on fire");
    }

    #[tokio::test]
    async fn test_respond_renders_the_error_envelope() {
        let mut router = Router::new();
        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(handler_fn("boom", |_ctx, _data| {
            Box::pin(async move {
                Err(PeriplusError::other(std::io::Error::other("disk on fire")))
            })
        }))];
        router.register(Method::GET, "/ships", chain);

        let response = router.respond(request(Method::GET, "/ships", "")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], json!("internal"));
        assert_eq!(body["error"]["message"], json!("disk on fire"));
        assert!(body["error"].get("issues").is_none());
    }

    #[tokio::test]
    async fn test_error_response_carries_validation_issues() {
        let error = PeriplusError::InvalidRequest {
            section: Section::Query,
            failure: ValidationFailure::new(vec![ValidationIssue::new(
                "limit",
                periplus_schema::codes::INVALID_TYPE,
                "expected integer, found string",
            )]),
        };

        let response = error_response(&error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], json!("invalid_request"));
        assert_eq!(body["error"]["issues"][0]["field"], json!("limit"));
        assert_eq!(body["error"]["issues"][0]["code"], json!("invalid_type"));
    }
}
