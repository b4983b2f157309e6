use thiserror::Error;

use crate::api::{status_message, ApiError};
use crate::auth::CredentialError;
use crate::kubeconfig::KubeConfigError;

/// Everything that can stop a command.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Error, Debug)]
pub enum NamespaxeError {
    #[error("No config file found. Please login using 'namespaxe login'.")]
    ConfigMissing,

    #[error("Failed to load credentials. Please log in again.")]
    CredentialParse(#[source] CredentialError),

    #[error("{}\nFailed to fetch the authentication token.", token_failure_reason(.0))]
    TokenFetch(#[source] ApiError),

    #[error("{}", status_text(.0))]
    HttpStatus(u16),

    #[error("{0}")]
    Application(String),

    #[error("{0}")]
    Transport(#[source] ApiError),

    #[error("Failed to read credentials: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("{0}")]
    InvalidCredentials(#[source] CredentialError),

    #[error("Failed to save credentials: {0}")]
    CredentialSave(#[source] CredentialError),

    #[error("An error occurred: {0}")]
    KubeConfig(#[from] KubeConfigError),
}

impl NamespaxeError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            NamespaxeError::ConfigMissing | NamespaxeError::CredentialParse(_) => 3,
            NamespaxeError::TokenFetch(_) | NamespaxeError::Transport(_) => 4,
            NamespaxeError::HttpStatus(_) => 5,
            NamespaxeError::Application(_) => 6,
            NamespaxeError::Prompt(_)
            | NamespaxeError::InvalidCredentials(_)
            | NamespaxeError::CredentialSave(_)
            | NamespaxeError::KubeConfig(_) => 1,
        }
    }
}

/// Errors from the operation request itself (not the token fetch).
impl From<ApiError> for NamespaxeError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status(code) => NamespaxeError::HttpStatus(code),
            other => NamespaxeError::Transport(other),
        }
    }
}

fn status_text(code: &u16) -> String {
    status_message(*code)
}

fn token_failure_reason(err: &ApiError) -> String {
    match err {
        ApiError::Status(code) => format!("Request failed with status code: {}", code),
        other => other.to_string(),
    }
}
