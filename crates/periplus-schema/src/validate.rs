//! The validating parser.
//!
//! Parsing walks a value against a [`Schema`] and produces the *parsed*
//! value: coerced where the coercing mode permits it, reduced to declared
//! object properties, order preserved. All issues are collected in one pass
//! so a failure reports every offending field, not just the first.

use crate::schema::{Schema, SchemaKind};
use serde_json::{Map, Number, Value};
use serde::Serialize;

/// Stable machine-readable issue codes.
pub mod codes {
    /// The value's JSON type does not match the declared type.
    pub const INVALID_TYPE: &str = "invalid_type";
    /// A required object property is missing.
    pub const REQUIRED: &str = "required";
    /// The value is not one of the admissible enumeration values.
    pub const INVALID_ENUM: &str = "invalid_enum";
    /// The value is below the declared minimum (or too short).
    pub const TOO_SMALL: &str = "too_small";
    /// The value is above the declared maximum (or too long).
    pub const TOO_BIG: &str = "too_big";
    /// The raw data could not be read as JSON at all.
    pub const INVALID_JSON: &str = "invalid_json";
}

/// One offending field in a failed parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the field (`"user.id"`, `"items.3"`); empty at the root.
    pub field: String,
    /// Stable code from [`codes`].
    pub code: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue.
    #[must_use]
    pub fn new(field: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    fn invalid_type(field: &str, expected: &str, found: &str) -> Self {
        Self::new(
            field,
            codes::INVALID_TYPE,
            format!("expected {expected}, found {found}"),
        )
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// A failed parse: every issue found in one walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    /// Creates a failure from collected issues.
    #[must_use]
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// The collected issues, in walk order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether any issue carries the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl Schema {
    /// Parses a value strictly: no coercion of string-encoded scalars.
    ///
    /// Used for request bodies and response bodies, which are already JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] listing every offending field.
    pub fn parse(&self, value: &Value) -> Result<Value, ValidationFailure> {
        self.parse_with(value, false)
    }

    /// Parses a value with string coercion enabled.
    ///
    /// Headers, path params, and query params arrive as text; declared
    /// integer/number/boolean fields accept their string renderings
    /// (`"42"`, `"true"`), and fail the usual way when the text does not
    /// parse.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] listing every offending field.
    pub fn parse_coercing(&self, value: &Value) -> Result<Value, ValidationFailure> {
        self.parse_with(value, true)
    }

    fn parse_with(&self, value: &Value, coerce: bool) -> Result<Value, ValidationFailure> {
        let mut issues = Vec::new();
        match parse_at(self, value, "", coerce, &mut issues) {
            Some(parsed) if issues.is_empty() => Ok(parsed),
            _ => Err(ValidationFailure::new(issues)),
        }
    }
}

fn join(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}.{segment}")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_at(
    schema: &Schema,
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    // The unknown schema admits anything verbatim.
    let Some(kind) = schema.kind else {
        return Some(value.clone());
    };

    if value.is_null() {
        if schema.nullable {
            return Some(Value::Null);
        }
        issues.push(ValidationIssue::invalid_type(path, kind.name(), "null"));
        return None;
    }

    let parsed = match kind {
        SchemaKind::String => parse_string(schema, value, path, coerce, issues),
        SchemaKind::Integer => parse_integer(schema, value, path, coerce, issues),
        SchemaKind::Number => parse_number(schema, value, path, coerce, issues),
        SchemaKind::Boolean => parse_boolean(value, path, coerce, issues),
        SchemaKind::Object => parse_object(schema, value, path, coerce, issues),
        SchemaKind::Array => parse_array(schema, value, path, coerce, issues),
    }?;

    if !schema.enum_values.is_empty() && !schema.enum_values.contains(&parsed) {
        issues.push(ValidationIssue::new(
            path,
            codes::INVALID_ENUM,
            format!(
                "value is not one of the {} admissible values",
                schema.enum_values.len()
            ),
        ));
        return None;
    }

    Some(parsed)
}

fn parse_string(
    schema: &Schema,
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if coerce => n.to_string(),
        Value::Bool(b) if coerce => b.to_string(),
        other => {
            issues.push(ValidationIssue::invalid_type(path, "string", type_name(other)));
            return None;
        }
    };

    let length = text.chars().count() as u64;
    if let Some(min) = schema.min_length {
        if length < min {
            issues.push(ValidationIssue::new(
                path,
                codes::TOO_SMALL,
                format!("must be at least {min} characters"),
            ));
            return None;
        }
    }
    if let Some(max) = schema.max_length {
        if length > max {
            issues.push(ValidationIssue::new(
                path,
                codes::TOO_BIG,
                format!("must be at most {max} characters"),
            ));
            return None;
        }
    }

    Some(Value::String(text))
}

fn check_bounds(
    schema: &Schema,
    actual: f64,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> bool {
    if let Some(min) = schema.minimum {
        if actual < min {
            issues.push(ValidationIssue::new(
                path,
                codes::TOO_SMALL,
                format!("must be at least {min}"),
            ));
            return false;
        }
    }
    if let Some(max) = schema.maximum {
        if actual > max {
            issues.push(ValidationIssue::new(
                path,
                codes::TOO_BIG,
                format!("must be at most {max}"),
            ));
            return false;
        }
    }
    true
}

fn parse_integer(
    schema: &Schema,
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let number = match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.clone(),
        Value::Number(_) => {
            issues.push(ValidationIssue::invalid_type(path, "integer", "number"));
            return None;
        }
        Value::String(s) if coerce => match s.trim().parse::<i64>() {
            Ok(i) => Number::from(i),
            Err(_) => {
                issues.push(ValidationIssue::invalid_type(path, "integer", "string"));
                return None;
            }
        },
        other => {
            issues.push(ValidationIssue::invalid_type(path, "integer", type_name(other)));
            return None;
        }
    };

    let actual = number.as_f64().unwrap_or_default();
    check_bounds(schema, actual, path, issues).then_some(Value::Number(number))
}

fn parse_number(
    schema: &Schema,
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let number = match value {
        Value::Number(n) => n.clone(),
        Value::String(s) if coerce => match s.trim().parse::<f64>().ok().and_then(Number::from_f64)
        {
            Some(n) => n,
            None => {
                issues.push(ValidationIssue::invalid_type(path, "number", "string"));
                return None;
            }
        },
        other => {
            issues.push(ValidationIssue::invalid_type(path, "number", type_name(other)));
            return None;
        }
    };

    let actual = number.as_f64().unwrap_or_default();
    check_bounds(schema, actual, path, issues).then_some(Value::Number(number))
}

fn parse_boolean(
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::String(s) if coerce && s == "true" => Some(Value::Bool(true)),
        Value::String(s) if coerce && s == "false" => Some(Value::Bool(false)),
        other => {
            issues.push(ValidationIssue::invalid_type(path, "boolean", type_name(other)));
            None
        }
    }
}

fn parse_object(
    schema: &Schema,
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let Value::Object(map) = value else {
        issues.push(ValidationIssue::invalid_type(path, "object", type_name(value)));
        return None;
    };

    let mut out = Map::new();
    let mut ok = true;

    for (name, property) in &schema.properties {
        let child = join(path, name);
        match map.get(name) {
            Some(v) => match parse_at(property, v, &child, coerce, issues) {
                Some(parsed) => {
                    out.insert(name.clone(), parsed);
                }
                None => ok = false,
            },
            None => {
                if schema.requires(name) {
                    issues.push(ValidationIssue::new(
                        &child,
                        codes::REQUIRED,
                        "required field is missing",
                    ));
                    ok = false;
                }
            }
        }
    }

    // Required names without a declared property schema get a presence
    // check only; the value passes through untyped.
    for name in &schema.required {
        if schema.properties.contains_key(name) {
            continue;
        }
        match map.get(name) {
            Some(v) => {
                out.insert(name.clone(), v.clone());
            }
            None => {
                issues.push(ValidationIssue::new(
                    join(path, name),
                    codes::REQUIRED,
                    "required field is missing",
                ));
                ok = false;
            }
        }
    }

    ok.then_some(Value::Object(out))
}

fn parse_array(
    schema: &Schema,
    value: &Value,
    path: &str,
    coerce: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let Value::Array(elements) = value else {
        issues.push(ValidationIssue::invalid_type(path, "array", type_name(value)));
        return None;
    };

    let Some(items) = &schema.items else {
        return Some(value.clone());
    };

    let mut out = Vec::with_capacity(elements.len());
    let mut ok = true;
    for (index, element) in elements.iter().enumerate() {
        let child = join(path, &index.to_string());
        match parse_at(items, element, &child, coerce, issues) {
            Some(parsed) => out.push(parsed),
            None => ok = false,
        }
    }

    ok.then_some(Value::Array(out))
}
