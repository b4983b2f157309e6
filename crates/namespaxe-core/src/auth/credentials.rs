use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read credential file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No credentials stored for {0}")]
    MissingEntry(String),

    #[error("Stored credentials are not valid base64")]
    InvalidEncoding,

    #[error("Stored credentials are missing the ':' separator")]
    MissingSeparator,

    #[error("Username must not contain ':'.")]
    InvalidUsername,

    #[error("Failed to write credential file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub username: String,
    pub password: String,
}

impl StoredCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The stored form is `user:pass` split at the first `:`, so only the
    /// password may contain one.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.username.contains(':') {
            return Err(CredentialError::InvalidUsername);
        }
        Ok(())
    }

    fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.username, self.password))
    }

    fn decode(encoded: &str) -> Result<Self, CredentialError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| CredentialError::InvalidEncoding)?;
        let pair = String::from_utf8(bytes).map_err(|_| CredentialError::InvalidEncoding)?;
        let (username, password) = pair
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;
        Ok(Self::new(username, password))
    }
}

// Keep passwords out of logs and panic messages.
impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    auths: BTreeMap<String, AuthEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AuthEntry {
    auth: String,
}

/// The `config.json` credential file.
///
/// Layout: `{"auths": {"<login url>": {"auth": base64("user:pass")}}}`.
pub struct CredentialStore {
    path: PathBuf,
    key: String,
}

impl CredentialStore {
    pub fn new(path: PathBuf, key: impl Into<String>) -> Self {
        Self {
            path,
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load stored credentials.
    ///
    /// Returns `Ok(None)` when no file exists and an error when the file is
    /// present but does not hold a decodable entry for this store's key.
    pub fn load(&self) -> Result<Option<StoredCredentials>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| CredentialError::Unreadable {
            path: self.path.clone(),
            source,
        })?;
        let file: CredentialFile = serde_json::from_str(&contents)?;
        let entry = file
            .auths
            .get(&self.key)
            .ok_or_else(|| CredentialError::MissingEntry(self.key.clone()))?;

        let credentials = StoredCredentials::decode(&entry.auth)?;
        debug!(path = %self.path.display(), username = %credentials.username, "Loaded stored credentials");
        Ok(Some(credentials))
    }

    /// Write credentials, replacing whatever the file held before.
    pub fn save(&self, credentials: &StoredCredentials) -> Result<(), CredentialError> {
        credentials.validate()?;

        let write_err = |source| CredentialError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut auths = BTreeMap::new();
        auths.insert(
            self.key.clone(),
            AuthEntry {
                auth: credentials.encode(),
            },
        );
        let contents = to_indented_json(&CredentialFile { auths })?;
        std::fs::write(&self.path, contents).map_err(write_err)?;

        debug!(path = %self.path.display(), "Saved credentials");
        Ok(())
    }
}

fn to_indented_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const KEY: &str = "https://auth0.pyincorporation.com/tool-authenticate";

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("nested").join("config.json"), KEY)
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&StoredCredentials::new("alice", "s3cret")).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.username, "alice");
        assert_eq!(loaded.password, "s3cret");
    }

    #[test]
    fn test_password_with_colon_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&StoredCredentials::new("bob", "a:b:c")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().password, "a:b:c");
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&StoredCredentials::new("alice", "s3cret")).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["auths"][KEY]["auth"], "YWxpY2U6czNjcmV0");
        assert!(raw.contains("\n    \"auths\""));
    }

    #[test]
    fn test_username_with_colon_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = store.save(&StoredCredentials::new("a:b", "pw")).unwrap_err();

        assert!(matches!(err, CredentialError::InvalidUsername));
        assert!(!store.exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&StoredCredentials::new("old", "one")).unwrap();
        store.save(&StoredCredentials::new("new", "two")).unwrap();

        assert_eq!(store.load().unwrap().unwrap(), StoredCredentials::new("new", "two"));
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = CredentialStore::new(path, KEY).load().unwrap_err();
        assert!(matches!(err, CredentialError::Malformed(_)));
    }

    #[test]
    fn test_missing_key_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"auths": {"https://elsewhere": {"auth": "YTpi"}}}"#).unwrap();

        let err = CredentialStore::new(path, KEY).load().unwrap_err();
        assert!(matches!(err, CredentialError::MissingEntry(_)));
    }

    #[test]
    fn test_invalid_base64_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let body = format!(r#"{{"auths": {{"{}": {{"auth": "!!not-base64!!"}}}}}}"#, KEY);
        std::fs::write(&path, body).unwrap();

        let err = CredentialStore::new(path, KEY).load().unwrap_err();
        assert!(matches!(err, CredentialError::InvalidEncoding));
    }

    #[test]
    fn test_missing_separator_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        // base64("nocolon")
        let body = format!(r#"{{"auths": {{"{}": {{"auth": "bm9jb2xvbg=="}}}}}}"#, KEY);
        std::fs::write(&path, body).unwrap();

        let err = CredentialStore::new(path, KEY).load().unwrap_err();
        assert!(matches!(err, CredentialError::MissingSeparator));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = StoredCredentials::new("alice", "s3cret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("s3cret"));
    }
}
