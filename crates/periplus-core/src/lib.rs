//! # Periplus Core
//!
//! Core types for the Periplus routing toolkit.
//!
//! This crate provides the building blocks the rest of Periplus is
//! assembled from:
//!
//! - [`RouteConfig`] - Declarative description of one route
//! - [`RouteContext`] - Per-request context carrying request data and the response
//! - [`ValidatedRequest`] - Parsed request payload handed to handlers
//! - [`Middleware`] and [`Next`] - The per-route chain
//! - [`PeriplusError`] - The two toolkit errors plus transparent passthrough

#![doc(html_root_url = "https://docs.rs/periplus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chain;
mod config;
mod context;
mod error;
mod types;
mod validated;

pub use chain::{handler_fn, BoxFuture, FnMiddleware, HandlerFn, Middleware, Next};
pub use config::{
    AutoDocs, DocsConfig, DocsDirective, RequestSchemas, ResponseExpectation, RouteConfig,
};
pub use context::{RequestId, ResponseState, RouteContext};
pub use error::{PeriplusError, PeriplusResult, Section};
pub use types::{Request, Response};
pub use validated::ValidatedRequest;

// Path parameters appear in the context API, so the type is part of
// this crate's surface as well.
pub use periplus_router::Params;
