//! # Periplus Test
//!
//! Test utilities for exercising Periplus routes entirely in memory.
//! No server is started and no port is bound: requests run through the
//! same registration, validation, and middleware path as production
//! traffic, and responses come back with assertion helpers attached.
//!
//! ## Key Features
//!
//! - **In-memory dispatch**: [`TestClient`] drives a
//!   [`Router`](periplus_rest::Router) directly.
//! - **Request builder**: [`TestRequest`] builds methods, headers,
//!   query strings, and JSON bodies fluently.
//! - **Response assertions**: [`TestResponse`] offers chainable
//!   status, header, and JSON checks.
//!
//! ## Example
//!
//! ```ignore
//! use http::{Method, StatusCode};
//! use periplus_test::TestClient;
//!
//! let client = TestClient::single(Method::GET, "/ships/{shipId}", config, handlers)?;
//!
//! let response = client.get("/ships/42").send().await;
//! response
//!     .assert_status(StatusCode::OK)
//!     .assert_json_field("shipId", &42.into());
//! ```

#![doc(html_root_url = "https://docs.rs/periplus-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
