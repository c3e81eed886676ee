//! Test client for in-memory route testing.

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use periplus_core::{Middleware, PeriplusResult, RouteConfig};
use periplus_rest::{rest, Router};
use serde::Serialize;

use crate::request::TestRequestBuilder;
use crate::response::TestResponse;

/// A test client that runs requests against a router in memory.
///
/// No server or port is involved; requests take the same registration
/// and dispatch path production traffic would, including validation and
/// the whole middleware chain.
///
/// # Example
///
/// ```ignore
/// use periplus_test::TestClient;
///
/// let client = TestClient::new(router);
///
/// let response = client.get("/ships/42").send().await;
/// response.assert_status(StatusCode::OK);
/// ```
#[must_use]
pub struct TestClient {
    router: Router,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Wraps a configured router.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            default_headers: Vec::new(),
        }
    }

    /// Creates a client around a single registered route.
    ///
    /// Convenient for tests that exercise one route in isolation.
    ///
    /// # Errors
    ///
    /// Returns any route registration failure.
    pub fn single(
        method: Method,
        template: &str,
        config: RouteConfig,
        handlers: Vec<Arc<dyn Middleware>>,
    ) -> PeriplusResult<Self> {
        let mut router = Router::new();
        rest(&mut router, method, template, config, handlers)?;
        Ok(Self::new(router))
    }

    /// Adds a header that will be included in every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Creates a GET request builder.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request builder.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request builder.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a PATCH request builder.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request builder with a custom method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, uri))
    }
}

/// A request builder bound to a test client.
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl<'a> TestClientRequest<'a> {
    fn new(client: &'a TestClient, builder: TestRequestBuilder) -> Self {
        let mut builder = builder;
        for (name, value) in &client.default_headers {
            builder = builder.header(name, value);
        }
        Self { client, builder }
    }

    /// Sets a header on the request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Appends a query string pair.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request, rendering any failure as its error envelope.
    ///
    /// This is what a real client would see: validation failures come
    /// back as JSON envelopes with the matching status code.
    ///
    /// # Panics
    ///
    /// Panics if the request itself cannot be built.
    pub async fn send(self) -> TestResponse {
        let request = self.builder.build().expect("valid test request");
        let response = self
            .client
            .router
            .respond(request.into_http_request())
            .await;
        TestResponse::from_http(response).await
    }

    /// Dispatches the request, surfacing toolkit errors directly.
    ///
    /// Useful for asserting on
    /// [`PeriplusError`](periplus_core::PeriplusError) variants instead
    /// of rendered envelopes.
    ///
    /// # Errors
    ///
    /// Returns whatever error the route's chain raised.
    ///
    /// # Panics
    ///
    /// Panics if the request itself cannot be built.
    pub async fn dispatch(self) -> PeriplusResult<TestResponse> {
        let request = self.builder.build().expect("valid test request");
        let response = self
            .client
            .router
            .dispatch(request.into_http_request())
            .await?;
        Ok(TestResponse::from_http(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use periplus_core::{handler_fn, PeriplusError, RequestSchemas, Section};
    use periplus_schema::Schema;
    use serde_json::json;

    fn ship_config() -> RouteConfig {
        RouteConfig::new().with_request(
            RequestSchemas::new().with_params(
                Schema::object()
                    .property("shipId", Schema::integer())
                    .required_property("shipId"),
            ),
        )
    }

    fn show_ship() -> Vec<Arc<dyn Middleware>> {
        vec![Arc::new(handler_fn("show_ship", |ctx, data| {
            let params = data.params().clone();
            Box::pin(async move { ctx.response_mut().set_json(&params) })
        }))]
    }

    fn ship_client() -> TestClient {
        TestClient::single(Method::GET, "/ships/{shipId}", ship_config(), show_ship()).unwrap()
    }

    #[tokio::test]
    async fn test_single_route_round_trip() {
        let client = ship_client();

        let response = client.get("/ships/42").send().await;
        response.assert_status(StatusCode::OK);
        response.assert_json_eq(&json!({"shipId": 42}));
    }

    #[tokio::test]
    async fn test_send_renders_validation_envelope() {
        let client = ship_client();

        let response = client.get("/ships/unsinkable").send().await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_error_code("invalid_request");
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_raw_error() {
        let client = ship_client();

        let error = client
            .get("/ships/unsinkable")
            .dispatch()
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            PeriplusError::InvalidRequest {
                section: Section::Params,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_default_headers_applied() {
        let config = RouteConfig::new().with_request(
            RequestSchemas::new().with_headers(Schema::object().required_property("x-api-key")),
        );
        let guarded = handler_fn("guarded", |ctx, _data| {
            Box::pin(async move { ctx.response_mut().set_json(&json!({"ok": true})) })
        });
        let client = TestClient::single(Method::GET, "/guarded", config, vec![Arc::new(guarded)])
            .unwrap()
            .with_default_header("x-api-key", "seven-seas");

        let response = client.get("/guarded").send().await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_query_builder_reaches_validation() {
        let config = RouteConfig::new().with_request(
            RequestSchemas::new().with_query(
                Schema::object()
                    .property("limit", Schema::integer())
                    .required_property("limit"),
            ),
        );
        let list_ships = handler_fn("list_ships", |ctx, data| {
            let query = data.query().clone();
            Box::pin(async move { ctx.response_mut().set_json(&query) })
        });
        let client =
            TestClient::single(Method::GET, "/ships", config, vec![Arc::new(list_ships)]).unwrap();

        let response = client.get("/ships").query("limit", "25").send().await;
        response.assert_json_eq(&json!({"limit": 25}));
    }

    #[tokio::test]
    async fn test_json_body_round_trip() {
        let config = RouteConfig::new().with_request(
            RequestSchemas::new().with_body(
                Schema::object()
                    .property("name", Schema::string())
                    .required_property("name"),
            ),
        );
        let create_ship = handler_fn("create_ship", |ctx, data| {
            let body = data.body().clone();
            Box::pin(async move { ctx.response_mut().set_json(&body) })
        });
        let client =
            TestClient::single(Method::POST, "/ships", config, vec![Arc::new(create_ship)])
                .unwrap();

        let response = client
            .post("/ships")
            .json(&json!({"name": "Argo"}))
            .send()
            .await;
        response.assert_status(StatusCode::OK);
        response.assert_json_eq(&json!({"name": "Argo"}));
    }

    #[tokio::test]
    async fn test_unmatched_path_is_empty_404() {
        let client = ship_client();

        let response = client.get("/docks").send().await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.body().is_empty());
    }
}
