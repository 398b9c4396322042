//! Authentication schemes, modes and bound transport configurations

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::settings::ClientSettings;

/// One of the two credential schemes the API uses.
///
/// Clerk session tokens guard the web-app endpoints (`/api/*`); JWTs issued
/// by the mobile sign-in flow guard the versioned API (`/api/v1/*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// Clerk session token (primary scheme).
    Clerk,
    /// JWT bearer token (secondary scheme).
    Jwt,
}

impl AuthScheme {
    /// Display name of the scheme.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Clerk => "Clerk",
            Self::Jwt => "JWT",
        }
    }

    /// Command-line flag that supplies this scheme's credential.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Clerk => "--clerk",
            Self::Jwt => "--bearer",
        }
    }

    /// Remediation text for a 401/403 caused by this scheme's missing credential.
    #[must_use]
    pub fn missing_credential_hint(self) -> String {
        format!(
            "Requires {} authentication. Use {} flag",
            self.display_name(),
            self.flag()
        )
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Credential an endpoint needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthRequirement {
    /// Public endpoint.
    #[default]
    None,
    /// Needs a Clerk session token.
    Clerk,
    /// Needs a JWT.
    Jwt,
}

impl AuthRequirement {
    /// The scheme required, if any.
    #[must_use]
    pub const fn scheme(self) -> Option<AuthScheme> {
        match self {
            Self::None => None,
            Self::Clerk => Some(AuthScheme::Clerk),
            Self::Jwt => Some(AuthScheme::Jwt),
        }
    }
}

/// Which schemes have a credential in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// No credential supplied.
    #[default]
    None,
    /// Only a Clerk token.
    ClerkOnly,
    /// Only a JWT.
    JwtOnly,
    /// Both tokens.
    Both,
}

impl AuthMode {
    /// Derives the mode from which credentials are present.
    #[must_use]
    pub const fn from_presence(clerk: bool, jwt: bool) -> Self {
        match (clerk, jwt) {
            (true, true) => Self::Both,
            (true, false) => Self::ClerkOnly,
            (false, true) => Self::JwtOnly,
            (false, false) => Self::None,
        }
    }

    /// Returns true if the scheme has a credential in this mode.
    #[must_use]
    pub const fn has(self, scheme: AuthScheme) -> bool {
        match self {
            Self::Both => true,
            Self::ClerkOnly => matches!(scheme, AuthScheme::Clerk),
            Self::JwtOnly => matches!(scheme, AuthScheme::Jwt),
            Self::None => false,
        }
    }

    /// Schemes without a credential, in declaration order.
    #[must_use]
    pub fn missing(self) -> Vec<AuthScheme> {
        [AuthScheme::Clerk, AuthScheme::Jwt]
            .into_iter()
            .filter(|scheme| !self.has(*scheme))
            .collect()
    }

    /// Human-readable status line.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::None => "No authentication",
            Self::ClerkOnly => "Clerk token only",
            Self::JwtOnly => "JWT token only",
            Self::Both => "Clerk + JWT tokens provided",
        }
    }
}

/// A bearer credential for one scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    scheme: AuthScheme,
    token: String,
}

impl Credential {
    /// Creates a credential.
    #[must_use]
    pub fn new(scheme: AuthScheme, token: impl Into<String>) -> Self {
        Self {
            scheme,
            token: token.into(),
        }
    }

    /// The scheme this credential belongs to.
    #[must_use]
    pub const fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("scheme", &self.scheme)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Transport configuration for one scheme: base URL, timeout and credential.
///
/// Built once per run and reused for every request issued under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundConfig {
    /// Base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Credential injected as `Authorization: Bearer ...`, if any
    pub credential: Option<Credential>,
}

impl BoundConfig {
    /// Configuration without a credential.
    #[must_use]
    pub fn anonymous(settings: &ClientSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout: settings.timeout,
            credential: None,
        }
    }

    /// Configuration carrying the given credential.
    #[must_use]
    pub fn authenticated(settings: &ClientSettings, credential: Credential) -> Self {
        Self {
            credential: Some(credential),
            ..Self::anonymous(settings)
        }
    }

    /// Scheme of the bound credential, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<AuthScheme> {
        self.credential.as_ref().map(Credential::scheme)
    }
}
