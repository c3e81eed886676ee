//! # Periplus Rest
//!
//! Route registration and dispatch for the Periplus toolkit.
//!
//! This crate ties the pieces together:
//!
//! - [`rest`] documents a route and installs its middleware chain
//! - [`Router`] matches incoming requests and runs the chain
//! - [`translate_template`] maps `{name}` templates to router patterns
//! - [`error_response`] renders a failed dispatch as a JSON envelope
//!
//! ## Example
//!
//! ```rust,ignore
//! use http::Method;
//! use periplus_rest::{rest, Router};
//!
//! let mut router = Router::new();
//! rest(&mut router, Method::GET, "/ships/{shipId}", config, handlers)?;
//!
//! let response = router.respond(request).await;
//! ```

#![doc(html_root_url = "https://docs.rs/periplus-rest/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod register;
mod rest;
mod router;

pub use register::translate_template;
pub use rest::rest;
pub use router::{error_response, Router};
