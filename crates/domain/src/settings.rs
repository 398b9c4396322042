//! Run settings
//!
//! Already-parsed configuration handed to the core by the CLI layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API base URL (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport settings shared by every bound configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL requests are issued against.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(with = "crate::testing::duration_millis")]
    pub timeout: Duration,
}

impl ClientSettings {
    /// Creates settings for the given base URL with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Options for the model catalogue validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOptions {
    /// Report a model whose `provider` differs from its enclosing provider key.
    pub strict_provider_match: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            strict_provider_match: true,
        }
    }
}
