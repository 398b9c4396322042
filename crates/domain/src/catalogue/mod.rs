//! Endpoint test catalogue
//!
//! A catalogue is an ordered list of [`TestSpec`]s. Declaration order is
//! execution order and report order.

mod endpoints;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::auth::AuthRequirement;
use crate::error::{DomainError, DomainResult};
use crate::request::{HttpMethod, RequestBody};

pub use endpoints::{KNOWN_ENDPOINT_COUNT, omnichat_catalogue};

/// Structural check applied to a 2xx response on top of the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCheck {
    /// Status code only.
    #[default]
    StatusOnly,
    /// Validate the body as the AI model catalogue.
    ModelCatalogue,
}

/// A note shown when an entry returns a specific, expected failure status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectationNote {
    /// Status the note applies to.
    pub status: u16,
    /// Note text.
    pub note: String,
}

/// Static description of one endpoint check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique display name, `"{METHOD} {path template}"`
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Concrete request path with placeholders filled in
    pub path: String,
    /// Request body template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Credential the endpoint needs
    #[serde(default)]
    pub auth: AuthRequirement,
    /// Extra response check
    #[serde(default)]
    pub check: ResponseCheck,
    /// Expected-failure note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<ExpectationNote>,
}

impl TestSpec {
    /// Creates a public entry whose name is derived from method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: format!("{method} {path}"),
            method,
            path,
            body: None,
            auth: AuthRequirement::None,
            check: ResponseCheck::StatusOnly,
            note: None,
        }
    }

    /// Creates an entry with an explicit display name, for templated paths.
    #[must_use]
    pub fn named(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(method, path)
        }
    }

    /// Attaches a body template.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the credential requirement.
    #[must_use]
    pub const fn auth(mut self, auth: AuthRequirement) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the response check.
    #[must_use]
    pub const fn check(mut self, check: ResponseCheck) -> Self {
        self.check = check;
        self
    }

    /// Attaches an expected-failure note.
    #[must_use]
    pub fn note(mut self, status: u16, note: impl Into<String>) -> Self {
        self.note = Some(ExpectationNote {
            status,
            note: note.into(),
        });
        self
    }

    /// The note for an observed status, if one was declared.
    #[must_use]
    pub fn note_for(&self, status: u16) -> Option<&str> {
        self.note
            .as_ref()
            .filter(|n| n.status == status)
            .map(|n| n.note.as_str())
    }
}

/// Checks catalogue invariants: unique names, names led by their method,
/// absolute paths.
///
/// # Errors
///
/// Returns [`DomainError::InvalidCatalogueEntry`] for the first offending entry.
pub fn validate_catalogue(specs: &[TestSpec]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for spec in specs {
        let invalid = |reason: &str| DomainError::InvalidCatalogueEntry {
            name: spec.name.clone(),
            reason: reason.to_string(),
        };
        if !seen.insert(spec.name.as_str()) {
            return Err(invalid("duplicate name"));
        }
        if !spec.name.starts_with(spec.method.as_str()) {
            return Err(invalid("name does not start with its method"));
        }
        if !spec.path.starts_with('/') {
            return Err(invalid("path must start with '/'"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_name_from_method_and_path() {
        let spec = TestSpec::new(HttpMethod::Get, "/api/battery");
        assert_eq!(spec.name, "GET /api/battery");
        assert_eq!(spec.auth, AuthRequirement::None);
    }

    #[test]
    fn note_matches_only_its_status() {
        let spec = TestSpec::new(HttpMethod::Post, "/api/v1/auth/refresh")
            .note(401, "Expected: Requires valid refresh token");
        assert_eq!(
            spec.note_for(401),
            Some("Expected: Requires valid refresh token")
        );
        assert_eq!(spec.note_for(400), None);
    }

    #[test]
    fn rejects_duplicate_names() {
        let specs = vec![
            TestSpec::new(HttpMethod::Get, "/api/config"),
            TestSpec::new(HttpMethod::Get, "/api/config"),
        ];
        assert!(matches!(
            validate_catalogue(&specs),
            Err(DomainError::InvalidCatalogueEntry { reason, .. }) if reason == "duplicate name"
        ));
    }

    #[test]
    fn rejects_name_method_mismatch() {
        let specs = vec![TestSpec::named("GET /x", HttpMethod::Post, "/x")];
        assert!(validate_catalogue(&specs).is_err());
    }

    #[test]
    fn rejects_relative_path() {
        let specs = vec![TestSpec::named("GET x", HttpMethod::Get, "x")];
        assert!(validate_catalogue(&specs).is_err());
    }
}
