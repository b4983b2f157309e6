//! API client for the namespaxe authentication and resource services.
//!
//! The protocol is two requests per operation: a GET to the token endpoint
//! that sets the `csrftoken` and `sessionid` cookies, then a POST that echoes
//! them back together with an `X-CSRFToken` header.

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::auth::session::{CSRF_COOKIE, SESSION_COOKIE};
use crate::auth::{SessionToken, StoredCredentials};
use crate::config::Settings;
use crate::models::{ApiEnvelope, Namespace};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

const APPLICATION_JSON: &str = "application/json";

/// Marks the POST as an AJAX call; the service's CSRF middleware expects it.
const X_REQUESTED_WITH: &str = "x-requested-with";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
const X_CSRF_TOKEN: &str = "x-csrftoken";

/// JSON body sent to the login and resource endpoints.
#[derive(Debug, Serialize)]
pub struct OperationRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<&'a str>,
}

impl<'a> OperationRequest<'a> {
    pub fn new(credentials: &'a StoredCredentials) -> Self {
        Self {
            username: &credentials.username,
            password: &credentials.password,
            resource_type: None,
            resource_name: None,
        }
    }

    pub fn resource_type(mut self, resource_type: &'a str) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn resource_name(mut self, resource_name: &'a str) -> Self {
        self.resource_name = Some(resource_name);
        self
    }
}

/// HTTP client for the namespaxe services.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    settings: Settings,
}

impl ApiClient {
    pub fn new(settings: Settings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch a fresh CSRF token and session cookie.
    pub async fn fetch_token(&self) -> Result<SessionToken, ApiError> {
        let url = self.settings.token_url();
        debug!(url = %url, "Fetching session token");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        let response = Self::check_response(response)?;

        let mut csrf_token = None;
        let mut session_id = None;
        for cookie in response.cookies() {
            match cookie.name() {
                CSRF_COOKIE => csrf_token = Some(cookie.value().to_string()),
                SESSION_COOKIE => session_id = Some(cookie.value().to_string()),
                _ => {}
            }
        }
        if csrf_token.is_none() {
            warn!(url = %url, "Token response did not set a csrftoken cookie");
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse token response: {}", e)))?;
        let extra: Map<String, Value> = match body {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ApiError::InvalidResponse(format!(
                    "Token response is not a JSON object: {}",
                    other
                )))
            }
        };

        Ok(SessionToken {
            csrf_token,
            session_id,
            extra,
        })
    }

    /// Authenticate the credentials against the login endpoint.
    pub async fn login(
        &self,
        token: &SessionToken,
        credentials: &StoredCredentials,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self.settings.login_url();
        let body = OperationRequest::new(credentials);
        self.post(&url, token, &body).await
    }

    /// List resources of a type, e.g. `ns`.
    pub async fn list(
        &self,
        token: &SessionToken,
        credentials: &StoredCredentials,
        resource_type: &str,
    ) -> Result<ApiEnvelope<Vec<Namespace>>, ApiError> {
        let url = self.settings.resource_url("list", &[resource_type]);
        let body = OperationRequest::new(credentials).resource_type(resource_type);
        self.post(&url, token, &body).await
    }

    /// Describe a single named resource.
    pub async fn describe(
        &self,
        token: &SessionToken,
        credentials: &StoredCredentials,
        resource_type: &str,
        resource_name: &str,
    ) -> Result<ApiEnvelope<Namespace>, ApiError> {
        let url = self
            .settings
            .resource_url("describe", &[resource_type, resource_name]);
        let body = OperationRequest::new(credentials)
            .resource_type(resource_type)
            .resource_name(resource_name);
        self.post(&url, token, &body).await
    }

    /// Fetch the cluster-access configuration for a resource.
    pub async fn install_k8s_config(
        &self,
        token: &SessionToken,
        credentials: &StoredCredentials,
        resource_type: &str,
        resource_name: &str,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self
            .settings
            .resource_url("install-k8s-config", &[resource_type, resource_name]);
        let body = OperationRequest::new(credentials)
            .resource_type(resource_type)
            .resource_name(resource_name);
        self.post(&url, token, &body).await
    }

    fn session_headers(token: &SessionToken) -> Result<header::HeaderMap, ApiError> {
        let invalid = |e: header::InvalidHeaderValue| {
            ApiError::InvalidResponse(format!("Session token is not a valid header value: {}", e))
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(X_REQUESTED_WITH, header::HeaderValue::from_static(XML_HTTP_REQUEST));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static(APPLICATION_JSON));
        if let Some(ref csrf) = token.csrf_token {
            headers.insert(X_CSRF_TOKEN, header::HeaderValue::from_str(csrf).map_err(invalid)?);
        }
        if let Some(cookies) = token.cookie_header() {
            headers.insert(header::COOKIE, header::HeaderValue::from_str(&cookies).map_err(invalid)?);
        }
        Ok(headers)
    }

    /// Only 200 counts as success; every other status maps to `ApiError::Status`.
    fn check_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::OK {
            Ok(response)
        } else {
            warn!(url = %response.url(), status = status.as_u16(), "Request failed");
            Err(ApiError::Status(status.as_u16()))
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        token: &SessionToken,
        body: &B,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        debug!(url = %url, "Sending POST request");

        let response = self
            .client
            .post(url)
            .headers(Self::session_headers(token)?)
            .json(body)
            .send()
            .await?;

        let response = Self::check_response(response)?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn client_for(server: &mockito::Server) -> ApiClient {
        let settings = Settings::new("/unused", "/unused", &server.url(), &server.url())
            .with_timeout(Duration::from_secs(5));
        ApiClient::new(settings).unwrap()
    }

    fn token() -> SessionToken {
        SessionToken {
            csrf_token: Some("X".to_string()),
            session_id: Some("Y".to_string()),
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_fetch_token_merges_cookies_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("set-cookie", "csrftoken=X; Path=/")
            .with_header("set-cookie", "sessionid=Y; Path=/; HttpOnly")
            .with_body(r#"{"a": 1}"#)
            .create_async()
            .await;

        let token = client_for(&server).fetch_token().await.unwrap();

        assert_eq!(token.csrf_token.as_deref(), Some("X"));
        assert_eq!(token.session_id.as_deref(), Some("Y"));
        assert_eq!(token.extra.get("a"), Some(&json!(1)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_token_non_200_carries_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data")
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).fetch_token().await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_fetch_token_connection_refused_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base = format!("http://127.0.0.1:{}", port);
        let settings = Settings::new("/unused", "/unused", &base, &base);
        let err = ApiClient::new(settings).unwrap().fetch_token().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(err.to_string().starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn test_list_sends_session_headers_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/list/ns")
            .match_header("x-requested-with", "XMLHttpRequest")
            .match_header("x-csrftoken", "X")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_header("cookie", Matcher::Regex("csrftoken=X".to_string()))
            .match_header("cookie", Matcher::Regex("sessionid=Y".to_string()))
            .match_body(Matcher::Json(json!({
                "username": "alice",
                "password": "s3cret",
                "resource_type": "ns"
            })))
            .with_status(200)
            .with_body(r#"{"status": true, "data": [{"ns_name": "team-a"}]}"#)
            .create_async()
            .await;

        let creds = StoredCredentials::new("alice", "s3cret");
        let envelope = client_for(&server).list(&token(), &creds, "ns").await.unwrap();

        assert!(envelope.status);
        let records = envelope.into_data().unwrap().unwrap();
        assert_eq!(records[0].ns_name, Some(json!("team-a")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_describe_body_includes_resource_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/describe/ns/team-a")
            .match_body(Matcher::Json(json!({
                "username": "alice",
                "password": "s3cret",
                "resource_type": "ns",
                "resource_name": "team-a"
            })))
            .with_status(200)
            .with_body(r#"{"status": false, "message": "Not yours"}"#)
            .create_async()
            .await;

        let creds = StoredCredentials::new("alice", "s3cret");
        let envelope = client_for(&server)
            .describe(&token(), &creds, "ns", "team-a")
            .await
            .unwrap();

        assert!(!envelope.status);
        assert_eq!(envelope.message().as_deref(), Some("Not yours"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_describe_with_list_data_still_parses() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/describe/ns/ghost")
            .with_status(200)
            .with_body(r#"{"status": false, "message": "Namespace not found", "data": []}"#)
            .create_async()
            .await;

        let creds = StoredCredentials::new("alice", "s3cret");
        let envelope = client_for(&server)
            .describe(&token(), &creds, "ns", "ghost")
            .await
            .unwrap();

        assert!(!envelope.status);
        assert_eq!(envelope.message().as_deref(), Some("Namespace not found"));
    }

    #[tokio::test]
    async fn test_login_body_has_only_credentials() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tool-authenticate")
            .match_body(Matcher::Json(json!({"username": "alice", "password": "s3cret"})))
            .with_status(200)
            .with_body(r#"{"status": true}"#)
            .create_async()
            .await;

        let creds = StoredCredentials::new("alice", "s3cret");
        let envelope = client_for(&server).login(&token(), &creds).await.unwrap();

        assert!(envelope.status);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_non_200_maps_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/install-k8s-config/ns/team-a")
            .with_status(404)
            .create_async()
            .await;

        let creds = StoredCredentials::new("alice", "s3cret");
        let err = client_for(&server)
            .install_k8s_config(&token(), &creds, "ns", "team-a")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not Found: The requested resource could not be found.");
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/list/ns")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let creds = StoredCredentials::new("alice", "s3cret");
        let err = client_for(&server).list(&token(), &creds, "ns").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
