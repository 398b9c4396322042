//! OmniCheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod http;

pub use adapters::ReqwestHttpClient;
pub use http::{FormBuildError, build_form, endpoint_url};
