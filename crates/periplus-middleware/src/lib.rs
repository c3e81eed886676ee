//! # Periplus Middleware
//!
//! Built-in validation stages for the Periplus chain.
//!
//! Every registered route runs a chain assembled in a fixed shape; the
//! stages in this crate are the parts the toolkit contributes:
//!
//! ```text
//! Request → JsonBody → before → Validation → Handlers → after
//!              │                    │
//!              │                    ├─ parse headers/params/query/body
//!              │                    ├─ pre-set declared status
//!              │                    └─ validate response body (opt-in)
//!              └─ only when a body schema is declared
//! ```
//!
//! The [`ValidationStage`] replaces the chain payload: everything
//! downstream of it receives the typed, validated request data instead
//! of the empty placeholder the earlier stages saw.

#![doc(html_root_url = "https://docs.rs/periplus-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod stages;

pub use stages::{JsonBodyStage, ValidationStage};
