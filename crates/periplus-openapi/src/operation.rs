//! Operation building blocks: parameters, request bodies, responses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use periplus_schema::Schema;

/// An API operation as generated for a route.
///
/// This is the typed shape behind a generated [`PathItem`] slot;
/// hand-written slots need not conform to it.
///
/// [`PathItem`]: crate::PathItem
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code or `"default"`.
    pub responses: IndexMap<String, ResponseObject>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Query string parameter.
    Query,
    /// URL path parameter.
    Path,
    /// HTTP header.
    Header,
    /// Cookie.
    Cookie,
}

/// An operation parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    /// Creates an optional parameter with no schema.
    #[must_use]
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: false,
            schema: None,
        }
    }

    /// Marks the parameter required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the body must be present.
    #[serde(default)]
    pub required: bool,
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// Creates a required JSON request body.
    #[must_use]
    pub fn json(schema: Schema) -> Self {
        let mut content = IndexMap::new();
        content.insert("application/json".to_string(), MediaType::new(schema));
        Self {
            description: None,
            required: true,
            content,
        }
    }
}

/// Media type content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl MediaType {
    /// Creates content described by a schema.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

/// Response definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseObject {
    /// Description (required by OpenAPI).
    pub description: String,
    /// Response headers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Header>,
    /// Response content by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl ResponseObject {
    /// Creates a response with the given description and nothing else.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            headers: IndexMap::new(),
            content: IndexMap::new(),
        }
    }
}

/// Response header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_location_rename() {
        let parameter = Parameter::new("userId", ParameterLocation::Path)
            .required()
            .with_schema(Schema::string());

        let value = serde_json::to_value(&parameter).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "userId",
                "in": "path",
                "required": true,
                "schema": {"type": "string"}
            })
        );
    }

    #[test]
    fn test_optional_parameter_keeps_required_false() {
        let parameter = Parameter::new("page", ParameterLocation::Query);
        let value = serde_json::to_value(&parameter).unwrap();
        assert_eq!(value["required"], json!(false));
    }

    #[test]
    fn test_request_body_json() {
        let body = RequestBody::json(Schema::object().property("name", Schema::string()));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["required"], json!(true));
        assert_eq!(
            value["content"]["application/json"]["schema"]["type"],
            json!("object")
        );
    }

    #[test]
    fn test_operation_serialization_shape() {
        let mut operation = Operation {
            tags: vec!["ships".to_string()],
            description: Some("List ships".to_string()),
            ..Operation::default()
        };
        operation
            .responses
            .insert("200".to_string(), ResponseObject::new("OK"));

        let value = serde_json::to_value(&operation).unwrap();
        assert_eq!(
            value,
            json!({
                "tags": ["ships"],
                "description": "List ships",
                "responses": {"200": {"description": "OK"}}
            })
        );
    }

    #[test]
    fn test_response_with_header_and_content() {
        let mut response = ResponseObject::new("Created");
        response.headers.insert(
            "Location".to_string(),
            Header {
                schema: Some(Schema::string()),
                ..Header::default()
            },
        );
        response.content.insert(
            "application/json".to_string(),
            MediaType::new(Schema::object()),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["headers"]["Location"]["schema"]["type"], json!("string"));
        assert_eq!(
            value["content"]["application/json"]["schema"]["type"],
            json!("object")
        );
    }
}
