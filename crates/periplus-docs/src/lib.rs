//! # Periplus Docs
//!
//! OpenAPI operation generation for the Periplus toolkit.
//!
//! Every registered route contributes at most one operation entry to a
//! shared document, controlled by the route's docs directive:
//!
//! - **Auto**: derive the operation from the route's request schemas
//!   and response expectation
//! - **Custom**: insert a hand-written operation value verbatim
//! - **Hidden**: register the route without documenting it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use periplus_core::{DocsConfig, RequestSchemas, RouteConfig};
//! use periplus_docs::generate_path;
//! use periplus_schema::Schema;
//!
//! let config = RouteConfig::new()
//!     .with_request(
//!         RequestSchemas::new()
//!             .with_params(Schema::object().property("shipId", Schema::string())),
//!     )
//!     .with_docs(DocsConfig::auto(document.clone()));
//!
//! generate_path(&http::Method::GET, "/ships/{shipId}", &config)?;
//! ```
//!
//! Entries are keyed by the `{name}` path template, so the document
//! reads the way the API is written down, not the way the router
//! matches it.

#![doc(html_root_url = "https://docs.rs/periplus-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod generator;

pub use error::{DocsError, DocsResult};
pub use generator::generate_path;
