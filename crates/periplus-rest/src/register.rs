//! Template translation and chain assembly.

use std::sync::Arc;

use regex::Regex;

use periplus_core::{Middleware, RouteConfig};
use periplus_middleware::{JsonBodyStage, ValidationStage};

/// Translates an OpenAPI-style path template into the router's pattern
/// syntax, turning each `{name}` placeholder into `:name`.
///
/// ```
/// use periplus_rest::translate_template;
///
/// assert_eq!(
///     translate_template("/ships/{shipId}/cargo/{itemId}"),
///     "/ships/:shipId/cargo/:itemId"
/// );
/// ```
#[must_use]
pub fn translate_template(template: &str) -> String {
    let param_regex = Regex::new(r"\{([^}]+)\}").expect("valid regex");
    param_regex.replace_all(template, ":$1").into_owned()
}

/// Assembles a route's full middleware chain from its config and the
/// handlers supplied at registration.
///
/// The shape is fixed: a JSON body stage first, only when the route
/// declares a body schema, then the `before` middleware, then
/// validation, then the handlers in the order supplied, then the
/// `after` middleware.
pub(crate) fn assemble_chain(
    config: RouteConfig,
    handlers: Vec<Arc<dyn Middleware>>,
) -> Vec<Arc<dyn Middleware>> {
    let parses_body = config.request.body.is_some();

    let mut chain: Vec<Arc<dyn Middleware>> = Vec::new();
    if parses_body {
        chain.push(Arc::new(JsonBodyStage::new()));
    }
    chain.extend(config.before);
    chain.push(Arc::new(ValidationStage::new(
        config.request,
        config.response,
    )));
    chain.extend(handlers);
    chain.extend(config.after);
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use periplus_core::{FnMiddleware, RequestSchemas};
    use periplus_router::PathRouter;
    use periplus_schema::Schema;

    fn stage(name: &'static str) -> impl Middleware {
        FnMiddleware::new(name, |ctx, request, next| {
            Box::pin(async move { next.run(ctx, request).await })
        })
    }

    #[test]
    fn test_translate_single_placeholder() {
        assert_eq!(translate_template("/ships/{shipId}"), "/ships/:shipId");
    }

    #[test]
    fn test_translate_leaves_literal_paths_alone() {
        assert_eq!(translate_template("/ships"), "/ships");
        assert_eq!(translate_template("/"), "/");
    }

    #[test]
    fn test_chain_shape_with_body_schema() {
        let config = RouteConfig::new()
            .with_request(RequestSchemas::new().with_body(Schema::object()))
            .use_before(stage("auth"))
            .use_after(stage("audit"));

        let chain = assemble_chain(config, vec![Arc::new(stage("create_ship"))]);
        let names: Vec<_> = chain.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec!["json_body", "auth", "validation", "create_ship", "audit"]
        );
    }

    #[test]
    fn test_chain_shape_without_body_schema() {
        let chain = assemble_chain(RouteConfig::new(), vec![Arc::new(stage("list_ships"))]);
        let names: Vec<_> = chain.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["validation", "list_ships"]);
    }

    // Property-based check that translated patterns really match the
    // URLs a client builds from the template.
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn translated_pattern_matches_substituted_urls(
            name in "[a-zA-Z][a-zA-Z0-9_]{0,11}",
            value in "[a-zA-Z0-9._-]{1,16}",
        ) {
            let template = format!("/ships/{{{name}}}/cargo");
            let pattern = translate_template(&template);
            prop_assert_eq!(&pattern, &format!("/ships/:{name}/cargo"));

            let mut paths = PathRouter::new();
            paths.insert(Method::GET, &pattern);
            let matched = paths
                .lookup(&Method::GET, &format!("/ships/{value}/cargo"))
                .unwrap();
            prop_assert_eq!(matched.params().get(&name), Some(value.as_str()));
        }

        #[test]
        fn translation_preserves_literal_segments(
            head in "[a-z]{1,8}",
            tail in "[a-z]{1,8}",
        ) {
            let template = format!("/{head}/{{id}}/{tail}");
            prop_assert_eq!(translate_template(&template), format!("/{head}/:id/{tail}"));
        }
    }
}
