//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One client is shared by every request of a run; credentials and timeouts
//! come from the [`BoundConfig`] passed with each request.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use omnicheck_application::ports::{HttpClient, HttpClientError};
use omnicheck_domain::auth::BoundConfig;
use omnicheck_domain::request::{HttpMethod, Payload, TransportRequest};
use omnicheck_domain::response::TransportResponse;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use tracing::trace;

use crate::http::{build_form, endpoint_url};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "omnicheck/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("omnicheck/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the serialized payload.
    fn attach_payload(
        builder: reqwest::RequestBuilder,
        payload: &Payload,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        match payload {
            Payload::None => Ok(builder),
            Payload::Json(bytes) => Ok(builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes.clone())),
            Payload::Multipart(form) => {
                let form =
                    build_form(form).map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;
                Ok(builder.multipart(form))
            }
        }
    }

    /// Renders an error with its whole source chain.
    ///
    /// reqwest keeps the interesting part (e.g. "Connection refused") in
    /// the sources, not in its own message.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    fn host_of(error: &reqwest::Error) -> String {
        error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = Self::describe(error);

        if error.is_connect() {
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: Self::host_of(error),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: Self::host_of(error),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!("too many redirects (max {MAX_REDIRECTS})"));
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::MalformedResponse(message);
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: &'a TransportRequest,
        config: &'a BoundConfig,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, HttpClientError>> + Send + 'a>> {
        Box::pin(async move {
            let url =
                endpoint_url(&config.base_url, &request.path).map_err(HttpClientError::InvalidUrl)?;
            let timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);

            trace!(method = %request.method, %url, "sending request");

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url)
                .timeout(config.timeout);

            if let Some(credential) = &config.credential {
                builder = builder.header(AUTHORIZATION, credential.authorization());
            }

            builder = Self::attach_payload(builder, &request.payload)?;

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status();
            let reason = status.canonical_reason().unwrap_or_default();

            let headers: Vec<(String, String)> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        HttpClientError::Timeout { timeout_ms }
                    } else {
                        HttpClientError::MalformedResponse(Self::describe(&e))
                    }
                })?
                .to_vec();

            Ok(TransportResponse::new(
                status.as_u16(),
                reason,
                headers,
                body,
            ))
        })
    }
}
