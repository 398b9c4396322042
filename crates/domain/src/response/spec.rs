//! Transport response type

use std::collections::BTreeMap;

/// Raw HTTP response as returned by the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase (e.g., "OK", "Not Found"); empty if unknown
    pub reason: String,
    /// Response headers keyed by lower-cased name
    pub headers: BTreeMap<String, String>,
    /// Body bytes, fully read
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response, lower-casing header names.
    #[must_use]
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        headers: impl IntoIterator<Item = (String, String)>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Looks up a header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true if the declared content type is a JSON media type.
    ///
    /// Accepts `application/json` and any `+json` structured suffix;
    /// parameters such as `charset` are ignored.
    #[must_use]
    pub fn declares_json(&self) -> bool {
        self.header("content-type")
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .is_some_and(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
    }

    /// Formats the failure text for a non-2xx status.
    #[must_use]
    pub fn status_error(&self) -> String {
        let reason = if self.reason.is_empty() {
            "Unknown Status"
        } else {
            self.reason.as_str()
        };
        format!("HTTP {}: {}", self.status, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_content_type(ct: &str) -> TransportResponse {
        TransportResponse::new(
            200,
            "OK",
            [("Content-Type".to_string(), ct.to_string())],
            Vec::new(),
        )
    }

    #[test]
    fn detects_json_content_types() {
        assert!(with_content_type("application/json").declares_json());
        assert!(with_content_type("application/json; charset=utf-8").declares_json());
        assert!(with_content_type("application/problem+json").declares_json());
        assert!(!with_content_type("text/html").declares_json());
        assert!(!with_content_type("not a mime").declares_json());
        assert!(!TransportResponse::default().declares_json());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = with_content_type("text/plain");
        assert_eq!(response.header("CONTENT-TYPE"), Some("text/plain"));
    }

    #[test]
    fn status_error_uses_reason_phrase() {
        let response = TransportResponse::new(404, "Not Found", [], Vec::new());
        assert_eq!(response.status_error(), "HTTP 404: Not Found");

        let unknown = TransportResponse::new(599, "", [], Vec::new());
        assert_eq!(unknown.status_error(), "HTTP 599: Unknown Status");
    }
}
