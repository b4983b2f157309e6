//! Runtime settings for the namespaxe client.
//!
//! All paths and service URLs are carried in a `Settings` value that is
//! built once at startup and handed to the components that need it, so
//! tests can point everything at a temporary directory and a mock server.
//!
//! Credentials are stored at `~/.namespaxe/config.json` and cluster access
//! configuration is written to `~/.kube/config` unless overridden.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Directory (under the home directory) holding the credential file
const CONFIG_DIR_NAME: &str = ".namespaxe";

/// Credential file name
const CONFIG_FILE: &str = "config.json";

/// Directory (under the home directory) holding the kube-config file
const KUBE_DIR_NAME: &str = ".kube";

/// Kube-config file name
const KUBE_CONFIG_FILE: &str = "config";

/// Authentication service base URL
const DEFAULT_AUTH_BASE_URL: &str = "https://auth0.pyincorporation.com";

/// Resource API base URL
const DEFAULT_API_BASE_URL: &str = "https://pycloud.pyincorporation.com";

/// Token endpoint path on the authentication service
const TOKEN_PATH: &str = "/data";

/// Login endpoint path on the authentication service
const LOGIN_PATH: &str = "/tool-authenticate";

/// HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_CONFIG_DIR: &str = "NAMESPAXE_CONFIG_DIR";
const ENV_KUBE_DIR: &str = "NAMESPAXE_KUBE_DIR";
const ENV_AUTH_URL: &str = "NAMESPAXE_AUTH_URL";
const ENV_API_URL: &str = "NAMESPAXE_API_URL";
const ENV_TIMEOUT_SECS: &str = "NAMESPAXE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub kube_dir: PathBuf,
    pub auth_base_url: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn new(
        config_dir: impl Into<PathBuf>,
        kube_dir: impl Into<PathBuf>,
        auth_base_url: &str,
        api_base_url: &str,
    ) -> Self {
        Self {
            config_dir: config_dir.into(),
            kube_dir: kube_dir.into(),
            auth_base_url: auth_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build settings from the user's home directory and `NAMESPAXE_*`
    /// environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    fn from_lookup<F>(lookup: F, home: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home_dir = || {
            home.clone()
                .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))
        };

        let config_dir = match lookup(ENV_CONFIG_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => home_dir()?.join(CONFIG_DIR_NAME),
        };
        let kube_dir = match lookup(ENV_KUBE_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => home_dir()?.join(KUBE_DIR_NAME),
        };
        let auth_base_url = lookup(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string());
        let api_base_url = lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let mut settings = Self::new(config_dir, kube_dir, &auth_base_url, &api_base_url);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {:?}", ENV_TIMEOUT_SECS, raw))?;
            settings.request_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn kube_config_file(&self) -> PathBuf {
        self.kube_dir.join(KUBE_CONFIG_FILE)
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", self.auth_base_url, TOKEN_PATH)
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.auth_base_url, LOGIN_PATH)
    }

    /// Key under `auths` in the credential file.
    pub fn credential_key(&self) -> String {
        self.login_url()
    }

    /// URL of a resource endpoint, e.g. `resource_url("describe", &["ns", "dev"])`
    /// gives `<api>/describe/ns/dev`.
    pub fn resource_url(&self, action: &str, segments: &[&str]) -> String {
        let mut url = format!("{}/{}", self.api_base_url, action);
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_under_home() {
        let settings = Settings::from_lookup(lookup_from(&[]), Some(PathBuf::from("/home/dev"))).unwrap();

        assert_eq!(settings.config_file(), PathBuf::from("/home/dev/.namespaxe/config.json"));
        assert_eq!(settings.kube_config_file(), PathBuf::from("/home/dev/.kube/config"));
        assert_eq!(settings.token_url(), "https://auth0.pyincorporation.com/data");
        assert_eq!(
            settings.credential_key(),
            "https://auth0.pyincorporation.com/tool-authenticate"
        );
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides() {
        let lookup = lookup_from(&[
            (ENV_CONFIG_DIR, "/tmp/nsx"),
            (ENV_KUBE_DIR, "/tmp/kube"),
            (ENV_API_URL, "http://127.0.0.1:9000/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]);
        let settings = Settings::from_lookup(lookup, None).unwrap();

        assert_eq!(settings.config_file(), PathBuf::from("/tmp/nsx/config.json"));
        assert_eq!(settings.kube_config_file(), PathBuf::from("/tmp/kube/config"));
        assert_eq!(settings.resource_url("list", &["ns"]), "http://127.0.0.1:9000/list/ns");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_home_is_error() {
        assert!(Settings::from_lookup(lookup_from(&[]), None).is_err());
    }

    #[test]
    fn test_bad_timeout_is_error() {
        let lookup = lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]);
        let err = Settings::from_lookup(lookup, Some(PathBuf::from("/home/dev"))).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let settings = Settings::new("/c", "/k", "http://auth", "http://api").with_timeout(Duration::from_secs(2));
        assert_eq!(settings.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_resource_url_segments() {
        let settings = Settings::new("/c", "/k", "http://auth", "http://api");
        assert_eq!(
            settings.resource_url("install-k8s-config", &["ns", "team-a"]),
            "http://api/install-k8s-config/ns/team-a"
        );
    }
}
