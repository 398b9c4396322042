//! HTTP client port

use std::future::Future;
use std::pin::Pin;

use omnicheck_domain::auth::BoundConfig;
use omnicheck_domain::request::TransportRequest;
use omnicheck_domain::response::TransportResponse;
use thiserror::Error;

/// Errors raised before a complete response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The server refused the connection.
    #[error("connection refused: {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Base URL and path do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be built.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The response body could not be read or the response was malformed.
    #[error("failed to read response: {0}")]
    MalformedResponse(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns true for a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Port for executing HTTP requests.
///
/// Implementations issue one request against `config.base_url`, attach the
/// bound credential as an `Authorization` header, honor `config.timeout`,
/// and read the full body before returning.
pub trait HttpClient: Send + Sync {
    /// Executes a request under the given bound configuration.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, timeout or a malformed
    /// response. Non-2xx statuses are not errors.
    fn execute<'a>(
        &'a self,
        request: &'a TransportRequest,
        config: &'a BoundConfig,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, HttpClientError>> + Send + 'a>>;
}
