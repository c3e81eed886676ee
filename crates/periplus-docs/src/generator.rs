//! Derives OpenAPI operation entries from route configs.
//!
//! Registration calls [`generate_path`] before the route is wired into
//! the router, so a failure here keeps the route out of the table
//! entirely. The derived entry is written into the route's
//! [`SharedDocument`](periplus_openapi::SharedDocument) under the
//! original `{name}` path template, not the translated pattern the
//! router matches on.

use http::Method;
use regex::Regex;
use serde_json::Value;

use periplus_core::{AutoDocs, DocsDirective, RouteConfig};
use periplus_openapi::{
    Header, MediaType, Operation, Parameter, ParameterLocation, PathItem, RequestBody,
    ResponseObject, SharedDocument,
};
use periplus_schema::Schema;

use crate::error::DocsResult;

/// Writes a route's operation entry into its OpenAPI document.
///
/// Routes without a docs config and routes marked hidden leave the
/// document untouched. A custom operation is inserted exactly as
/// given; an auto directive derives the operation from the route's
/// request schemas and response expectation. Registering the same
/// method and template again replaces the previous entry.
pub fn generate_path(method: &Method, template: &str, config: &RouteConfig) -> DocsResult<()> {
    let Some(docs) = &config.docs else {
        return Ok(());
    };

    match &docs.directive {
        DocsDirective::Hidden => Ok(()),
        DocsDirective::Custom(operation) => {
            insert(&docs.document, method, template, operation.clone());
            Ok(())
        }
        DocsDirective::Auto(extra) => {
            let operation = derive_operation(template, config, extra);
            let value = serde_json::to_value(operation)?;
            insert(&docs.document, method, template, value);
            Ok(())
        }
    }
}

/// Writes one operation value into the document under the template.
fn insert(document: &SharedDocument, method: &Method, template: &str, operation: Value) {
    if !PathItem::supports(method) {
        tracing::warn!(%method, template, "method has no OpenAPI slot, skipping docs entry");
        return;
    }
    document.update(|doc| {
        doc.paths
            .entry(template.to_string())
            .or_default()
            .set_operation(method, operation);
    });
}

/// Builds the operation for an auto directive.
///
/// Parameters come from the declared section schemas in a fixed order:
/// headers, then path params, then query. The response map holds a
/// single entry keyed by the declared status, or `"default"` when the
/// route declares none.
fn derive_operation(template: &str, config: &RouteConfig, extra: &AutoDocs) -> Operation {
    let mut operation = Operation {
        tags: extra.tags.clone(),
        ..Operation::default()
    };

    if let Some(schema) = &config.request.headers {
        operation
            .parameters
            .extend(section_parameters(schema, ParameterLocation::Header));
    }
    if let Some(schema) = &config.request.params {
        operation
            .parameters
            .extend(section_parameters(schema, ParameterLocation::Path));
    }
    warn_template_mismatch(template, config.request.params.as_ref());
    if let Some(schema) = &config.request.query {
        operation
            .parameters
            .extend(section_parameters(schema, ParameterLocation::Query));
    }

    if let Some(schema) = &config.request.body {
        operation.request_body = Some(RequestBody::json(schema.clone()));
    }

    let key = config
        .response
        .status
        .map_or_else(|| "default".to_string(), |status| status.as_u16().to_string());
    let mut response = ResponseObject::new(extra.description.clone().unwrap_or_default());
    for name in &config.response.headers {
        response.headers.insert(
            name.clone(),
            Header {
                description: None,
                schema: Some(Schema::string()),
            },
        );
    }
    response.content.insert(
        "application/json".to_string(),
        MediaType::new(config.response.schema.clone().unwrap_or_else(Schema::unknown)),
    );
    operation.responses.insert(key, response);

    operation
}

/// Converts one section schema's properties into parameters.
///
/// Property descriptions are hoisted to the parameter level; the
/// embedded schema fragment loses them so they are not repeated.
fn section_parameters(schema: &Schema, location: ParameterLocation) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    for (name, field) in &schema.properties {
        let required = match location {
            ParameterLocation::Path => true, // Path parameters are always required
            _ => schema.requires(name),
        };

        let mut parameter =
            Parameter::new(name.clone(), location).with_schema(field.clone().without_description());
        if required {
            parameter = parameter.required();
        }
        if let Some(description) = &field.description {
            parameter = parameter.with_description(description.clone());
        }
        parameters.push(parameter);
    }
    parameters
}

/// Warns when the path template and the params schema disagree.
///
/// A `{name}` placeholder without a schema property still matches
/// requests but is missing from the parameters array; a schema property
/// without a placeholder never receives a value. Neither blocks
/// registration.
fn warn_template_mismatch(template: &str, params: Option<&Schema>) {
    let placeholders = template_parameters(template);
    for name in &placeholders {
        let declared = params.is_some_and(|schema| schema.properties.contains_key(name));
        if !declared {
            tracing::warn!(
                template,
                parameter = %name,
                "path placeholder has no params schema property"
            );
        }
    }
    if let Some(schema) = params {
        for name in schema.properties.keys() {
            if !placeholders.iter().any(|p| p == name) {
                tracing::warn!(
                    template,
                    parameter = %name,
                    "params schema property has no path placeholder"
                );
            }
        }
    }
}

/// Extracts `{name}` placeholder names from a path template.
fn template_parameters(template: &str) -> Vec<String> {
    let param_regex = Regex::new(r"\{([^}]+)\}").expect("valid regex");
    param_regex
        .captures_iter(template)
        .filter_map(|cap| cap.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}
