//! Built-in chain stages.
//!
//! Registration assembles these around the user's middleware in a
//! fixed shape:
//!
//! 1. [`json_body`] - Parse the raw body (only when a body schema is declared)
//! 2. `before` middleware from the route config
//! 3. [`validation`] - Parse declared sections, then validate the response
//! 4. The route's handlers
//! 5. `after` middleware from the route config

pub mod json_body;
pub mod validation;

pub use json_body::JsonBodyStage;
pub use validation::ValidationStage;
