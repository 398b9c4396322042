//! Decoded response body

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TransportResponse;

/// Response body as retained on a test result.
///
/// Serialized as `{"type": "json" | "text", "value": ...}` so a text body
/// that happens to look like JSON keeps its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Body decoded as JSON.
    Json(Value),
    /// Body kept as opaque text.
    Text(String),
}

impl ResponseBody {
    /// Decodes a response body.
    ///
    /// JSON is only attempted when the response declares a JSON content type
    /// and the body is non-empty. Undecodable JSON falls back to text.
    #[must_use]
    pub fn decode(response: &TransportResponse) -> Self {
        if response.declares_json()
            && !response.body.is_empty()
            && let Ok(value) = serde_json::from_slice(&response.body)
        {
            return Self::Json(value);
        }
        Self::Text(String::from_utf8_lossy(&response.body).into_owned())
    }

    /// Returns the JSON value, if the body was decoded as JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Short single-line preview for verbose output.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let full = match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text.replace(['\n', '\r'], " "),
        };
        if full.chars().count() > max_chars {
            let cut: String = full.chars().take(max_chars).collect();
            format!("{cut}...")
        } else {
            full
        }
    }
}
