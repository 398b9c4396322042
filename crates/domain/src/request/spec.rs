//! Transport request type

use super::{HttpMethod, Payload};

/// A single request handed to the transport adapter.
///
/// The path is relative to the bound configuration's base URL and may carry
/// a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path plus optional query, e.g. `/api/search?q=test`
    pub path: String,
    /// Serialized body
    pub payload: Payload,
}

impl TransportRequest {
    /// Creates a request without a body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: Payload::None,
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }
}
