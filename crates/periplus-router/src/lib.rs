//! Method and path matching for the Periplus toolkit.
//!
//! Routes are registered with `:name` parameter segments and matched
//! against concrete request paths. A successful match yields a stable
//! route id plus the extracted parameters in declaration order.
//!
//! # Example
//!
//! ```rust
//! use http::Method;
//! use periplus_router::PathRouter;
//!
//! let mut router = PathRouter::new();
//! router.insert(Method::GET, "/ships/:shipId");
//!
//! let matched = router.lookup(&Method::GET, "/ships/argo").unwrap();
//! assert_eq!(matched.params().get("shipId"), Some("argo"));
//! ```

#![doc(html_root_url = "https://docs.rs/periplus-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod router;

pub use router::{Params, PathRouter, RouteMatch};
