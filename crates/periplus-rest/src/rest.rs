//! The registration entry point.

use std::sync::Arc;

use http::Method;

use periplus_core::{Middleware, PeriplusError, PeriplusResult, RouteConfig};
use periplus_docs::generate_path;

use crate::register::{assemble_chain, translate_template};
use crate::router::Router;

/// Registers one route: documentation first, then the route table.
///
/// The handlers run in the order given, sandwiched between the
/// config's `before` and `after` middleware with validation in front
/// of them. The OpenAPI entry is written under the original `{name}`
/// template while the router matches on the translated `:name`
/// pattern, so the document reads the way the API is written down. A
/// documentation failure leaves the route unregistered.
///
/// Registering the same method and template again replaces both the
/// chain and the documentation entry.
///
/// # Errors
///
/// Returns any documentation generation failure, carried through as a
/// passthrough error.
pub fn rest(
    router: &mut Router,
    method: Method,
    template: &str,
    config: RouteConfig,
    handlers: Vec<Arc<dyn Middleware>>,
) -> PeriplusResult<()> {
    generate_path(&method, template, &config).map_err(PeriplusError::other)?;

    let pattern = translate_template(template);
    tracing::debug!(%method, template, pattern = %pattern, "registering route");
    router.register(method, &pattern, assemble_chain(config, handlers));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::{BodyExt, Full};
    use periplus_core::{
        handler_fn, AutoDocs, DocsConfig, Middleware, Request, RequestSchemas, Response,
        ResponseExpectation, Section,
    };
    use periplus_openapi::{Info, OpenApi, SharedDocument};
    use periplus_schema::Schema;
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

    fn ship_params() -> RequestSchemas {
        RequestSchemas::new().with_params(
            Schema::object()
                .property("shipId", Schema::integer())
                .required_property("shipId"),
        )
    }

    fn echo_params() -> Vec<Arc<dyn Middleware>> {
        vec![Arc::new(handler_fn("echo_params", |ctx, data| {
            let params = data.params().clone();
            Box::pin(async move { ctx.response_mut().set_json(&params) })
        }))]
    }

    #[tokio::test]
    async fn test_registered_route_validates_and_dispatches() {
        let mut router = Router::new();
        let config = RouteConfig::new().with_request(ship_params());

        rest(
            &mut router,
            Method::GET,
            "/ships/{shipId}",
            config,
            echo_params(),
        )
        .unwrap();

        let response = router
            .dispatch(request(Method::GET, "/ships/42", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"shipId": 42}));
    }

    #[tokio::test]
    async fn test_invalid_params_skip_the_handler() {
        let mut router = Router::new();
        let invoked = Arc::new(Mutex::new(false));
        let seen = Arc::clone(&invoked);
        let handler = handler_fn("unreached", move |_ctx, _data| {
            let seen = Arc::clone(&seen);
            Box::pin(async move {
                *seen.lock().unwrap() = true;
                Ok(())
            })
        });

        rest(
            &mut router,
            Method::GET,
            "/ships/{shipId}",
            RouteConfig::new().with_request(ship_params()),
            vec![Arc::new(handler)],
        )
        .unwrap();

        let error = router
            .dispatch(request(Method::GET, "/ships/not-a-number", ""))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            PeriplusError::InvalidRequest {
                section: Section::Params,
                ..
            }
        ));
        assert!(!*invoked.lock().unwrap());
    }

    #[tokio::test]
    async fn test_declared_status_applies_without_handler_write() {
        let mut router = Router::new();
        let config = RouteConfig::new()
            .with_response(ResponseExpectation::new().with_status(StatusCode::ACCEPTED));
        let noop = handler_fn("noop", |_ctx, _data| Box::pin(async move { Ok(()) }));

        rest(
            &mut router,
            Method::POST,
            "/ships/refit",
            config,
            vec![Arc::new(noop)],
        )
        .unwrap();

        let response = router
            .dispatch(request(Method::POST, "/ships/refit", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_docs_keyed_by_template_while_routing_matches_url() {
        let docs = SharedDocument::new(OpenApi::new(Info::new("Harbor API", "1.0.0")));
        let mut router = Router::new();
        let config = RouteConfig::new()
            .with_request(ship_params())
            .with_docs(DocsConfig::auto(docs.clone()));

        rest(
            &mut router,
            Method::GET,
            "/ships/{shipId}",
            config,
            echo_params(),
        )
        .unwrap();

        let spec = docs.snapshot();
        assert!(spec.paths.contains_key("/ships/{shipId}"));
        assert!(!spec.paths.contains_key("/ships/:shipId"));

        let response = router
            .dispatch(request(Method::GET, "/ships/7", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"shipId": 7}));
    }

    #[tokio::test]
    async fn test_template_params_mismatch_warns_but_registers() {
        let docs = SharedDocument::new(OpenApi::new(Info::new("Harbor API", "1.0.0")));
        let mut router = Router::new();
        // {shipId} in the template, "vesselId" in the schema; the docs
        // generator warns about both sides and proceeds anyway.
        let config = RouteConfig::new()
            .with_request(
                RequestSchemas::new()
                    .with_params(Schema::object().property("vesselId", Schema::string())),
            )
            .with_docs(DocsConfig::auto(docs.clone()));

        rest(
            &mut router,
            Method::GET,
            "/ships/{shipId}",
            config,
            echo_params(),
        )
        .unwrap();

        assert_eq!(router.len(), 1);
        assert!(docs.snapshot().paths.contains_key("/ships/{shipId}"));

        let response = router
            .dispatch(request(Method::GET, "/ships/7", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_reregistration_replaces_chain_and_docs() {
        let docs = SharedDocument::new(OpenApi::new(Info::new("Harbor API", "1.0.0")));
        let mut router = Router::new();

        for revision in 1..=2 {
            let config = RouteConfig::new().with_docs(DocsConfig::auto_with(
                docs.clone(),
                AutoDocs::new().with_description(format!("revision {revision}")),
            ));
            let handler = handler_fn("manifest", move |ctx, _data| {
                Box::pin(async move { ctx.response_mut().set_json(&json!({"rev": revision})) })
            });
            rest(
                &mut router,
                Method::GET,
                "/manifest",
                config,
                vec![Arc::new(handler)],
            )
            .unwrap();
        }

        assert_eq!(router.len(), 1);

        let response = router
            .dispatch(request(Method::GET, "/manifest", ""))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"rev": 2}));

        let spec = docs.snapshot();
        let operation = spec.paths["/manifest"].operation(&Method::GET).unwrap();
        assert_eq!(
            operation["responses"]["default"]["description"],
            json!("revision 2")
        );
    }
}
