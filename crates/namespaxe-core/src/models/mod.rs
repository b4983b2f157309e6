//! Data models for namespaxe API responses.
//!
//! - `ApiEnvelope`: the `{status, message, data}` wrapper every endpoint returns
//! - `Namespace`: a namespace record as returned by list/describe

pub mod envelope;
pub mod namespace;

pub use envelope::{is_truthy, ApiEnvelope};
pub use namespace::Namespace;
