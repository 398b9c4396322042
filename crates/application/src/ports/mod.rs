//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.

mod http_client;

pub use http_client::{HttpClient, HttpClientError};
