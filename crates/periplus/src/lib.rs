//! # Periplus
//!
//! **Schema-Validated Routing with OpenAPI Generation**
//!
//! Periplus is a routing toolkit where one declarative description per
//! route drives everything else:
//!
//! - 📜 **Declarative Routes** – A [`RouteConfig`](prelude::RouteConfig) describes schemas, chain stages, and docs
//! - ✅ **Request Validation** – Headers, path params, query, and body are checked before handlers run
//! - 📖 **Self-Documenting** – OpenAPI path items are derived from the same schemas that validate
//! - ⚡ **Async Middleware** – Per-route chains built on boxed futures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use http::Method;
//! use periplus::prelude::*;
//!
//! let docs = SharedDocument::new(OpenApi::new(Info::new("Harbor API", "1.0.0")));
//! let mut router = Router::new();
//!
//! let config = RouteConfig::new()
//!     .with_request(RequestSchemas::new().with_params(
//!         Schema::object()
//!             .property("shipId", Schema::integer())
//!             .required_property("shipId"),
//!     ))
//!     .with_docs(DocsConfig::auto(docs.clone()));
//!
//! let show_ship = handler_fn("show_ship", |ctx, data| {
//!     let params = data.params().clone();
//!     Box::pin(async move { ctx.response_mut().set_json(&params) })
//! });
//! rest(&mut router, Method::GET, "/ships/{shipId}", config, vec![Arc::new(show_ship)])?;
//!
//! let response = router.respond(request).await;
//! ```
//!
//! ## Architecture
//!
//! Every registered route runs a fixed chain shape:
//!
//! ```text
//! Request → JsonBody → before → Validation → Handlers → after
//!                                                          ↓
//! Response ← ResponseValidation ←──────────────────────────┘
//! ```
//!
//! The JsonBody stage only appears when the route declares a body
//! schema, and response validation only runs when the route asks for it.

#![doc(html_root_url = "https://docs.rs/periplus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use periplus_core as core;

// Re-export the schema language
pub use periplus_schema as schema;

// Re-export the OpenAPI document model
pub use periplus_openapi as openapi;

// Re-export docs generation
pub use periplus_docs as docs;

// Re-export the chain stages
pub use periplus_middleware as middleware;

// Re-export the path matcher
pub use periplus_router as matcher;

// Re-export registration and dispatch - the main entry points
pub use periplus_rest::{rest, Router};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use periplus::prelude::*;
/// ```
pub mod prelude {
    pub use periplus_core::{
        handler_fn, AutoDocs, DocsConfig, Middleware, Next, Params, PeriplusError, PeriplusResult,
        Request, RequestSchemas, Response, ResponseExpectation, RouteConfig, RouteContext, Section,
        ValidatedRequest,
    };

    // Re-export the schema builder
    pub use periplus_schema::Schema;

    // Re-export the document handle and its root types
    pub use periplus_openapi::{Info, OpenApi, SharedDocument};

    // Re-export registration and dispatch
    pub use periplus_rest::{rest, Router};
}
