//! # failchain
//!
//! Structured errors as chains of annotated nodes.
//!
//! ## Design Philosophy
//!
//! - **Message**: Every node says what went wrong in plain text
//! - **Fields**: Named JSON values describe the failure for matching and debugging
//! - **Inner**: Each node may wrap the failure that caused it
//! - **Impersonation**: Foreign errors join a chain through [`Impersonate`]
//!
//! ## Usage
//!
//! ```rust
//! use failchain::{build, field, inner, depth, test_field_recursively};
//!
//! let result = build("e0")
//!     .with_field("id", 0)
//!     .parent_of(&build("e1").with_field("id", 1).done())
//!     .done();
//!
//! assert_eq!(field(&result, "id").unwrap(), 0);
//! assert_eq!(field(&inner(&result), "id").unwrap(), 1);
//! assert_eq!(depth(&result), 2);
//! assert!(test_field_recursively(&result, "id", 1));
//! assert!(!test_field_recursively(&result, "id", 2));
//! ```
//!
//! ## Principles
//!
//! - A finalized [`Failure`] is immutable and cheap to clone and share
//! - The field name `"message"` always means the node's message
//! - Lookups return [`Result`], only [`field_or_default`] swallows errors
//! - Nothing here logs; `tracing` output is opt-in through [`report`](crate::report)

mod builder;
mod error;
mod impersonate;
mod kind;
mod macros;
mod node;
mod query;

#[cfg(feature = "tracing")]
pub mod report;

pub use builder::Builder;
pub use error::Error;
pub use impersonate::{impersonate, Adapt, Impersonate};
pub use kind::ErrorKind;
pub use node::{Chain, Failure, Fields, MESSAGE_FIELD};
pub use query::{
    build, buildc, buildf, depth, field, field_or_default, inner, is_parent_of, like, message,
    new, newf, origin, same, test_field, test_field_recursively,
};
pub use serde_json::Value;

/// Result type alias using failchain Error
pub type Result<T> = std::result::Result<T, Error>;
