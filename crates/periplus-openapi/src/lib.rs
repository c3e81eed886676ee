//! OpenAPI 3.0 document model for the Periplus toolkit.
//!
//! This crate provides the document types that route registration writes
//! into and applications serve out: the root [`OpenApi`] object, path
//! items keyed by template, and the operation building blocks.
//!
//! Operations inside a [`PathItem`] are stored as raw JSON values rather
//! than typed structs. Generated operations are serialized [`Operation`]s;
//! hand-written operations supplied by an application are inserted
//! verbatim, whatever their shape.
//!
//! The [`SharedDocument`] handle wraps a document in a lock so that many
//! route registrations can contribute to one spec.
//!
//! # Example
//!
//! ```rust
//! use periplus_openapi::{Info, OpenApi, SharedDocument};
//!
//! let docs = SharedDocument::new(OpenApi::new(
//!     Info::new("Harbor API", "1.0.0").with_description("Port operations"),
//! ));
//!
//! let spec = docs.snapshot();
//! assert_eq!(spec.openapi, "3.0.3");
//! assert_eq!(spec.info.title, "Harbor API");
//! ```

#![doc(html_root_url = "https://docs.rs/periplus-openapi/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod document;
mod operation;

pub use document::{Info, OpenApi, PathItem, Server, SharedDocument};
pub use operation::{
    Header, MediaType, Operation, Parameter, ParameterLocation, RequestBody, ResponseObject,
};
