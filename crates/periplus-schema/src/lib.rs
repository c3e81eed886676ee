//! # Periplus Schema
//!
//! Declarative schema model and validating parser for the Periplus toolkit.
//!
//! A [`Schema`] plays two roles at once:
//!
//! - **Validation**: [`Schema::parse`] and [`Schema::parse_coercing`] check a
//!   JSON value against the schema and return the parsed value (coerced
//!   where permitted, stripped of undeclared object keys) or a
//!   [`ValidationFailure`] listing every offending field.
//! - **Documentation**: the schema serializes directly to an OpenAPI 3.0
//!   schema fragment, so the same declaration that guards a request section
//!   also describes it.
//!
//! ## Example
//!
//! ```rust
//! use periplus_schema::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .property("id", Schema::integer())
//!     .property("name", Schema::string())
//!     .required_property("id");
//!
//! // Strict parsing rejects a string where an integer is declared.
//! assert!(schema.parse(&json!({"id": "7", "name": "astrolabe"})).is_err());
//!
//! // Coercing parsing accepts it: string-sourced sections (path params,
//! // query, headers) arrive as text.
//! let parsed = schema
//!     .parse_coercing(&json!({"id": "7", "name": "astrolabe"}))
//!     .unwrap();
//! assert_eq!(parsed, json!({"id": 7, "name": "astrolabe"}));
//! ```

#![doc(html_root_url = "https://docs.rs/periplus-schema/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod schema;
mod validate;

pub use schema::{Schema, SchemaKind};
pub use validate::{codes, ValidationFailure, ValidationIssue};
