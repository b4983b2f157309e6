use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cookie carrying the anti-forgery token
pub const CSRF_COOKIE: &str = "csrftoken";

/// Cookie carrying the server-side session id
pub const SESSION_COOKIE: &str = "sessionid";

/// Per-call session returned by the token endpoint.
///
/// Holds the two cookies plus whatever JSON fields the endpoint returned.
/// A token is used for exactly one follow-up request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub csrf_token: Option<String>,
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionToken {
    /// `Cookie` header value echoing both session cookies back.
    pub fn cookie_header(&self) -> Option<String> {
        let pairs: Vec<String> = [
            (CSRF_COOKIE, self.csrf_token.as_deref()),
            (SESSION_COOKIE, self.session_id.as_deref()),
        ]
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}={}", name, v)))
        .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}
