//! The schema object model.
//!
//! Schemas are plain data: a type tag plus the constraints that matter for
//! request validation. The serde representation is the OpenAPI 3.0 schema
//! object, so a [`Schema`] can be embedded in generated documentation without
//! any conversion step. A schema with no type tag is the "unknown" schema:
//! it accepts any value and serializes to `{}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema type tag.
///
/// OpenAPI 3.0 has no `null` type; use [`Schema::nullable`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// String type.
    String,
    /// Number type (any JSON number).
    Number,
    /// Integer type (rejects fractional numbers).
    Integer,
    /// Boolean type.
    Boolean,
    /// Array type.
    Array,
    /// Object type.
    Object,
}

impl SchemaKind {
    /// Returns the lowercase name used in schema fragments and messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// A declarative schema.
///
/// Build one with the constructors ([`Schema::string`], [`Schema::object`],
/// …) and the consuming builder methods. Property insertion order is
/// preserved and drives the order of derived documentation parameters.
///
/// # Example
///
/// ```rust
/// use periplus_schema::Schema;
///
/// let pagination = Schema::object()
///     .property("limit", Schema::integer().description("Page size"))
///     .property("cursor", Schema::string())
///     .required_property("limit");
///
/// assert_eq!(pagination.required, vec!["limit"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema type tag; `None` means "unknown" (any value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub kind: Option<SchemaKind>,
    /// Schema format hint (e.g. `"date-time"`, `"uuid"`). Documentation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human description, hoisted to the parameter level in generated docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Names of required object properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Admissible values; checked after the type check.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "enum")]
    pub enum_values: Vec<serde_json::Value>,
    /// Inclusive lower bound for numbers and integers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numbers and integers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Minimum string length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "minLength")]
    pub min_length: Option<u64>,
    /// Maximum string length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxLength")]
    pub max_length: Option<u64>,
    /// Whether an explicit `null` is admitted (OpenAPI 3.0 style).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            kind: None,
            format: None,
            description: None,
            properties: IndexMap::new(),
            required: Vec::new(),
            items: None,
            enum_values: Vec::new(),
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
            nullable: false,
        }
    }
}

impl Schema {
    /// Creates the unknown schema: accepts any value, serializes to `{}`.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self {
            kind: Some(SchemaKind::String),
            ..Default::default()
        }
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self {
            kind: Some(SchemaKind::Integer),
            ..Default::default()
        }
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self {
            kind: Some(SchemaKind::Number),
            ..Default::default()
        }
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self {
            kind: Some(SchemaKind::Boolean),
            ..Default::default()
        }
    }

    /// Creates an array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            kind: Some(SchemaKind::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// Creates an object schema with no properties.
    #[must_use]
    pub fn object() -> Self {
        Self {
            kind: Some(SchemaKind::Object),
            ..Default::default()
        }
    }

    /// Adds a description.
    #[must_use]
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Adds a format hint.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Adds a property to an object schema.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Marks a property name as required.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Restricts the value to the given set.
    #[must_use]
    pub fn enumeration(mut self, values: impl IntoIterator<Item = serde_json::Value>) -> Self {
        self.enum_values = values.into_iter().collect();
        self
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Sets the minimum string length.
    #[must_use]
    pub fn min_length(mut self, min: u64) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum string length.
    #[must_use]
    pub fn max_length(mut self, max: u64) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Admits an explicit `null`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns a copy with the description removed.
    ///
    /// Generated documentation hoists property descriptions to the parameter
    /// level; the embedded type schema must not repeat them.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    /// Whether this schema carries a required marker for `name`.
    #[must_use]
    pub fn requires(&self, name: &str) -> bool {
        self.required.iter().any(|n| n == name)
    }

    /// Whether this is the unknown (any-value) schema node.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.kind.is_none()
    }
}
