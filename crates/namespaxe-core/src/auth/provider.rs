use std::io;

use super::StoredCredentials;

/// Source of credentials when `login` finds nothing stored.
///
/// The binary implements this with a terminal prompt; tests use
/// `StaticCredentials`.
pub trait CredentialProvider {
    fn credentials(&self) -> io::Result<StoredCredentials>;
}

/// Hands out the same username and password every time.
#[derive(Debug, Clone)]
pub struct StaticCredentials(StoredCredentials);

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self(StoredCredentials::new(username, password))
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> io::Result<StoredCredentials> {
        Ok(self.0.clone())
    }
}
