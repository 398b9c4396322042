//! Command-line arguments.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use omnicheck_application::Credentials;
use omnicheck_domain::settings::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use omnicheck_domain::{ClientSettings, ValidatorOptions};

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Exercises the OmniChat API and reports which endpoints pass.
#[derive(Debug, Parser)]
#[command(name = "omnicheck", version, about)]
pub struct Cli {
    /// Base URL of the API under test
    #[arg(long, env = "OMNICHAT_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Clerk session token for the web app endpoints
    #[arg(long, env = "OMNICHAT_CLERK_TOKEN", hide_env_values = true)]
    pub clerk: Option<String>,

    /// JWT for the versioned (/api/v1) endpoints
    #[arg(long, env = "OMNICHAT_BEARER_TOKEN", hide_env_values = true)]
    pub bearer: Option<String>,

    /// Deprecated: used as the Clerk token when neither --clerk nor --bearer is set
    #[arg(long)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Show response previews and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not flag models whose provider differs from their provider key
    #[arg(long)]
    pub lenient_provider: bool,
}

fn is_set(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl Cli {
    /// Whether the deprecated `--token` stands in for the Clerk token.
    #[must_use]
    pub fn uses_legacy_token(&self) -> bool {
        is_set(self.token.as_ref()) && !is_set(self.clerk.as_ref()) && !is_set(self.bearer.as_ref())
    }

    /// Transport settings for the run.
    #[must_use]
    pub fn settings(&self) -> ClientSettings {
        ClientSettings::new(self.url.clone()).with_timeout(Duration::from_secs(self.timeout))
    }

    /// Raw credentials, with the legacy token folded into the Clerk slot.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        let clerk = if self.uses_legacy_token() {
            self.token.clone()
        } else {
            self.clerk.clone()
        };
        Credentials::new(clerk, self.bearer.clone())
    }

    /// Validator options for the model catalogue check.
    #[must_use]
    pub const fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            strict_provider_match: !self.lenient_provider,
        }
    }
}
