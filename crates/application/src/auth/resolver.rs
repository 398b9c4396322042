//! Resolution of supplied credentials into bound transport configurations.

use omnicheck_domain::ClientSettings;
use omnicheck_domain::auth::{AuthMode, AuthRequirement, AuthScheme, BoundConfig, Credential};
use tracing::info;

/// Raw credential strings as supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Clerk session token
    pub clerk: Option<String>,
    /// JWT bearer token
    pub jwt: Option<String>,
}

impl Credentials {
    /// Creates a credential set.
    #[must_use]
    pub const fn new(clerk: Option<String>, jwt: Option<String>) -> Self {
        Self { clerk, jwt }
    }
}

/// The auth mode and one bound configuration per available scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuth {
    mode: AuthMode,
    anonymous: BoundConfig,
    clerk: Option<BoundConfig>,
    jwt: Option<BoundConfig>,
}

impl ResolvedAuth {
    /// Resolves credentials against the client settings.
    ///
    /// Empty or whitespace-only tokens count as absent. Never fails: with no
    /// credential every endpoint runs unauthenticated.
    #[must_use]
    pub fn resolve(settings: &ClientSettings, credentials: Credentials) -> Self {
        let bind = |scheme: AuthScheme, token: Option<String>| {
            token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .map(|t| BoundConfig::authenticated(settings, Credential::new(scheme, t)))
        };
        let clerk = bind(AuthScheme::Clerk, credentials.clerk);
        let jwt = bind(AuthScheme::Jwt, credentials.jwt);
        let mode = AuthMode::from_presence(clerk.is_some(), jwt.is_some());

        info!(mode = mode.description(), base_url = %settings.base_url, "resolved authentication");

        Self {
            mode,
            anonymous: BoundConfig::anonymous(settings),
            clerk,
            jwt,
        }
    }

    /// The derived auth mode.
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Returns true if a credential was supplied for the scheme.
    #[must_use]
    pub const fn is_bound(&self, scheme: AuthScheme) -> bool {
        self.bound(scheme).is_some()
    }

    /// The configuration an endpoint with this requirement runs under.
    ///
    /// Public endpoints always run anonymously. Protected endpoints use their
    /// scheme's configuration, or fall back to anonymous when it is unbound.
    #[must_use]
    pub fn config_for(&self, requirement: AuthRequirement) -> &BoundConfig {
        requirement
            .scheme()
            .and_then(|scheme| self.bound(scheme))
            .unwrap_or(&self.anonymous)
    }

    const fn bound(&self, scheme: AuthScheme) -> Option<&BoundConfig> {
        match scheme {
            AuthScheme::Clerk => self.clerk.as_ref(),
            AuthScheme::Jwt => self.jwt.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> ClientSettings {
        ClientSettings::new("http://localhost:3000")
    }

    fn resolve(clerk: Option<&str>, jwt: Option<&str>) -> ResolvedAuth {
        ResolvedAuth::resolve(
            &settings(),
            Credentials::new(clerk.map(str::to_string), jwt.map(str::to_string)),
        )
    }

    #[test]
    fn no_credentials_runs_everything_anonymously() {
        let auth = resolve(None, None);
        assert_eq!(auth.mode(), AuthMode::None);
        let requirements = [
            AuthRequirement::None,
            AuthRequirement::Clerk,
            AuthRequirement::Jwt,
        ];
        for requirement in requirements {
            assert_eq!(auth.config_for(requirement).credential, None);
        }
    }

    #[test]
    fn blank_tokens_are_absent() {
        assert_eq!(resolve(Some(""), Some("   ")).mode(), AuthMode::None);
    }

    #[test]
    fn each_scheme_gets_its_own_config() {
        let auth = resolve(Some("clerk-token"), Some("jwt-token"));
        assert_eq!(auth.mode(), AuthMode::Both);
        assert_eq!(
            auth.config_for(AuthRequirement::Clerk).scheme(),
            Some(AuthScheme::Clerk)
        );
        assert_eq!(
            auth.config_for(AuthRequirement::Jwt).scheme(),
            Some(AuthScheme::Jwt)
        );
        assert_eq!(auth.config_for(AuthRequirement::None).scheme(), None);
    }

    #[test]
    fn unbound_scheme_falls_back_to_anonymous() {
        let auth = resolve(None, Some("jwt-token"));
        assert_eq!(auth.mode(), AuthMode::JwtOnly);
        assert!(!auth.is_bound(AuthScheme::Clerk));
        assert_eq!(auth.config_for(AuthRequirement::Clerk).scheme(), None);
    }

    #[test]
    fn tokens_are_trimmed() {
        let auth = resolve(Some("  abc \n"), None);
        let credential = auth.config_for(AuthRequirement::Clerk).credential.clone();
        assert_eq!(
            credential.map(|c| c.authorization()),
            Some("Bearer abc".to_string())
        );
    }
}
