//! Authentication domain types

mod types;

pub use types::{AuthMode, AuthRequirement, AuthScheme, BoundConfig, Credential};
