//! Core library for the namespaxe command-line client.
//!
//! This crate provides:
//! - `Settings`: explicit configuration (directories, service URLs, timeout)
//! - `CredentialStore`: the on-disk `config.json` holding login credentials
//! - `ApiClient`: token acquisition and CSRF-protected resource requests
//! - `SessionClient`: the login/list/describe/install-k8s-config pipeline
//!
//! Rendering and prompting live in the binary; this crate only returns
//! typed results and errors whose `Display` text is the user-facing message.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod models;
pub mod session;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{CredentialError, CredentialProvider, CredentialStore, SessionToken, StoredCredentials};
pub use config::Settings;
pub use error::NamespaxeError;
pub use models::{ApiEnvelope, Namespace};
pub use session::{CredentialSource, Operation, SessionClient};
