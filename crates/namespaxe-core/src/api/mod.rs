//! HTTP client module for the namespaxe authentication and resource services.
//!
//! This module provides the `ApiClient` for fetching a CSRF session token
//! and issuing the authenticated POST requests behind every command.
//!
//! Every resource request carries the username and password in its JSON
//! body plus the `csrftoken`/`sessionid` cookie pair from a fresh token.

pub mod client;
pub mod error;

pub use client::{ApiClient, OperationRequest};
pub use error::{status_message, ApiError};
