//! OmniChat Check Domain - Core types
//!
//! This crate defines the domain model of the API conformance checker:
//! the endpoint catalogue, authentication modes, test results, the model
//! catalogue validator and result aggregation.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod catalogue;
pub mod error;
pub mod report;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use settings::{ClientSettings, ValidatorOptions};
pub use testing::TestResult;
