//! The validated request payload handed to handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PeriplusError, PeriplusResult, Section};

/// Parsed request data, one slot per request section.
///
/// Built by the validation stage from the parsed section values. A
/// section whose route declared no schema is `null`, never the raw
/// input, so handlers can only ever observe data that went through a
/// schema. Stages that run before validation see [`ValidatedRequest::empty`].
///
/// # Example
///
/// ```
/// use periplus_core::ValidatedRequest;
/// use serde_json::json;
///
/// let data = ValidatedRequest::empty().with_section(
///     periplus_core::Section::Params,
///     json!({"shipId": "argo"}),
/// );
///
/// assert_eq!(data.params()["shipId"], "argo");
/// assert!(data.body().is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRequest {
    headers: Value,
    params: Value,
    query: Value,
    body: Value,
}

impl ValidatedRequest {
    /// Creates a payload with every section `null`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            headers: Value::Null,
            params: Value::Null,
            query: Value::Null,
            body: Value::Null,
        }
    }

    /// Returns a copy with one section replaced.
    #[must_use]
    pub fn with_section(mut self, section: Section, value: Value) -> Self {
        self.set_section(section, value);
        self
    }

    /// Replaces one section.
    pub fn set_section(&mut self, section: Section, value: Value) {
        match section {
            Section::Headers => self.headers = value,
            Section::Params => self.params = value,
            Section::Query => self.query = value,
            Section::Body => self.body = value,
        }
    }

    /// The parsed headers section.
    #[must_use]
    pub const fn headers(&self) -> &Value {
        &self.headers
    }

    /// The parsed path parameters section.
    #[must_use]
    pub const fn params(&self) -> &Value {
        &self.params
    }

    /// The parsed query section.
    #[must_use]
    pub const fn query(&self) -> &Value {
        &self.query
    }

    /// The parsed body section.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Deserializes the parsed body into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns a passthrough error if the body does not fit `T`.
    pub fn body_as<T: DeserializeOwned>(&self) -> PeriplusResult<T> {
        serde_json::from_value(self.body.clone()).map_err(PeriplusError::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_empty_is_all_null() {
        let data = ValidatedRequest::empty();
        assert!(data.headers().is_null());
        assert!(data.params().is_null());
        assert!(data.query().is_null());
        assert!(data.body().is_null());
    }

    #[test]
    fn test_sections_are_independent() {
        let data = ValidatedRequest::empty()
            .with_section(Section::Query, json!({"page": 2}))
            .with_section(Section::Body, json!({"name": "argo"}));

        assert_eq!(data.query(), &json!({"page": 2}));
        assert_eq!(data.body(), &json!({"name": "argo"}));
        assert!(data.headers().is_null());
    }

    #[test]
    fn test_body_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct NewShip {
            name: String,
            masts: u8,
        }

        let data = ValidatedRequest::empty()
            .with_section(Section::Body, json!({"name": "argo", "masts": 1}));

        let ship: NewShip = data.body_as().unwrap();
        assert_eq!(
            ship,
            NewShip {
                name: "argo".to_string(),
                masts: 1
            }
        );
    }

    #[test]
    fn test_body_as_mismatch_is_passthrough() {
        let data = ValidatedRequest::empty();
        let error = data.body_as::<u32>().unwrap_err();
        assert!(matches!(error, PeriplusError::Other(_)));
    }
}
