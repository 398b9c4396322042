//! OmniChat Check Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - The HTTP client port the transport adapter implements
//! - Authentication mode resolution
//! - The catalogue run use case

pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use auth::{Credentials, ResolvedAuth};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError};
pub use use_cases::{RunCatalogue, RunContext, apply_auth_hints};
