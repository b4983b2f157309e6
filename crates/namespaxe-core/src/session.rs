//! The authenticated request pipeline behind every command.
//!
//! Each operation runs the same steps: check the credential file, load the
//! stored credentials, fetch a fresh session token, POST the operation, and
//! interpret the `{status, message, data}` envelope. `login` differs only in
//! that it may prompt for credentials and saves them on success.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{CredentialProvider, CredentialStore, SessionToken, StoredCredentials};
use crate::config::Settings;
use crate::error::NamespaxeError;
use crate::kubeconfig::write_kube_config;
use crate::models::{ApiEnvelope, Namespace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    List,
    Describe,
    InstallK8sConfig,
}

impl Operation {
    /// Message for a `status: false` response.
    pub fn failure_message(self, server_message: Option<String>) -> String {
        match (self, server_message) {
            (Operation::Login, Some(message)) => format!("Login failed: {}", message),
            (Operation::Login, None) => "Login failed.".to_string(),
            (_, Some(message)) => message,
            (Operation::List, None) => "No namespaces found.".to_string(),
            (Operation::Describe, None) => "No details found for the specified resource.".to_string(),
            (Operation::InstallK8sConfig, None) => "Failed to fetch Kubernetes configuration.".to_string(),
        }
    }
}

/// Where `login` got its credentials from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Stored,
    Prompted,
}

pub struct SessionClient<P> {
    api: ApiClient,
    store: CredentialStore,
    provider: P,
}

impl<P: CredentialProvider> SessionClient<P> {
    pub fn new(api: ApiClient, provider: P) -> Self {
        let settings = api.settings();
        let store = CredentialStore::new(settings.config_file(), settings.credential_key());
        Self { api, store, provider }
    }

    pub fn settings(&self) -> &Settings {
        self.api.settings()
    }

    pub fn credential_store(&self) -> &CredentialStore {
        &self.store
    }

    /// Credentials for `login`: the stored pair if readable, otherwise
    /// whatever the provider supplies.
    pub fn login_credentials(&self) -> Result<(StoredCredentials, CredentialSource), NamespaxeError> {
        match self.store.load() {
            Ok(Some(credentials)) => return Ok((credentials, CredentialSource::Stored)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable stored credentials"),
        }

        let credentials = self.provider.credentials().map_err(NamespaxeError::Prompt)?;
        credentials.validate().map_err(NamespaxeError::InvalidCredentials)?;
        Ok((credentials, CredentialSource::Prompted))
    }

    /// Authenticate `credentials` and store them once the service accepts them.
    pub async fn login_with(&self, credentials: &StoredCredentials) -> Result<(), NamespaxeError> {
        let token = self.session_token().await?;
        let envelope = self.api.login(&token, credentials).await?;
        Self::check_envelope(Operation::Login, &envelope)?;

        self.store
            .save(credentials)
            .map_err(NamespaxeError::CredentialSave)?;
        info!(username = %credentials.username, "Login successful");
        Ok(())
    }

    pub async fn login(&self) -> Result<CredentialSource, NamespaxeError> {
        let (credentials, source) = self.login_credentials()?;
        self.login_with(&credentials).await?;
        Ok(source)
    }

    /// List resources of `resource_type`. An absent `data` field is an empty list.
    pub async fn list(&self, resource_type: &str) -> Result<Vec<Namespace>, NamespaxeError> {
        let credentials = self.stored_credentials()?;
        let token = self.session_token().await?;

        let envelope = self.api.list(&token, &credentials, resource_type).await?;
        Self::check_envelope(Operation::List, &envelope)?;

        let records = Self::envelope_data(envelope)?.unwrap_or_default();
        debug!(resource_type, count = records.len(), "Listed resources");
        Ok(records)
    }

    pub async fn describe(&self, resource_type: &str, resource_name: &str) -> Result<Namespace, NamespaxeError> {
        let credentials = self.stored_credentials()?;
        let token = self.session_token().await?;

        let envelope = self
            .api
            .describe(&token, &credentials, resource_type, resource_name)
            .await?;
        Self::check_envelope(Operation::Describe, &envelope)?;

        Ok(Self::envelope_data(envelope)?.unwrap_or_default())
    }

    /// Fetch the cluster-access configuration and write it over the local
    /// kube-config file. Returns the path written.
    pub async fn install_k8s_config(
        &self,
        resource_type: &str,
        resource_name: &str,
    ) -> Result<PathBuf, NamespaxeError> {
        let credentials = self.stored_credentials()?;
        let token = self.session_token().await?;

        let envelope = self
            .api
            .install_k8s_config(&token, &credentials, resource_type, resource_name)
            .await?;
        Self::check_envelope(Operation::InstallK8sConfig, &envelope)?;

        let config = Self::envelope_data(envelope)?.unwrap_or_else(|| Value::Object(Map::new()));
        let path = self.settings().kube_config_file();
        write_kube_config(&path, &config)?;
        Ok(path)
    }

    fn stored_credentials(&self) -> Result<StoredCredentials, NamespaxeError> {
        if !self.store.exists() {
            return Err(NamespaxeError::ConfigMissing);
        }

        match self.store.load() {
            Ok(Some(credentials)) => Ok(credentials),
            Ok(None) => Err(NamespaxeError::ConfigMissing),
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "Stored credentials are unreadable");
                Err(NamespaxeError::CredentialParse(e))
            }
        }
    }

    async fn session_token(&self) -> Result<SessionToken, NamespaxeError> {
        self.api.fetch_token().await.map_err(NamespaxeError::TokenFetch)
    }

    /// Typed `data` of an envelope that already passed `check_envelope`.
    fn envelope_data<T: DeserializeOwned>(envelope: ApiEnvelope<T>) -> Result<Option<T>, NamespaxeError> {
        envelope.into_data().map_err(|e| {
            NamespaxeError::Transport(ApiError::InvalidResponse(format!("Unexpected response data: {}", e)))
        })
    }

    fn check_envelope<T>(operation: Operation, envelope: &ApiEnvelope<T>) -> Result<(), NamespaxeError> {
        if envelope.status {
            Ok(())
        } else {
            Err(NamespaxeError::Application(operation.failure_message(envelope.message())))
        }
    }
}
