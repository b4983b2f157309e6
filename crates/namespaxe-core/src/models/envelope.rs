use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response wrapper shared by the login and resource endpoints.
///
/// `data` stays raw JSON until the caller asks for it as `T`, so a failed
/// response whose `data` has some other shape still parses.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "")]
pub struct ApiEnvelope<T> {
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub status: bool,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(skip)]
    marker: PhantomData<T>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// `data` as `T`. A missing or `null` field is `None`.
    pub fn into_data(self) -> Result<Option<T>, serde_json::Error> {
        match self.data {
            None | Some(Value::Null) => Ok(None),
            Some(data) => serde_json::from_value(data).map(Some),
        }
    }
}

impl<T> ApiEnvelope<T> {
    /// Server-provided message, if it is present and non-empty.
    pub fn message(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other if is_truthy(other) => Some(other.to_string()),
            _ => None,
        }
    }
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(is_truthy).unwrap_or(false))
}
