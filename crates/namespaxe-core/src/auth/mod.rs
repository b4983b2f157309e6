//! Authentication module for credentials and per-request sessions.
//!
//! This module provides:
//! - `CredentialStore`: the `config.json` file holding the base64 login pair
//! - `SessionToken`: CSRF token and session cookie fetched before every call
//! - `CredentialProvider`: where credentials come from when none are stored
//!
//! Tokens are never cached; every operation fetches a fresh one.

pub mod credentials;
pub mod provider;
pub mod session;

pub use credentials::{CredentialError, CredentialStore, StoredCredentials};
pub use provider::{CredentialProvider, StaticCredentials};
pub use session::SessionToken;
