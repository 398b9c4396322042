//! Test results
//!
//! A [`TestResult`] is produced once per catalogue entry by the runner and
//! may then be amended by the response validator and the auth-hint pass.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::AuthScheme;
use crate::response::{ResponseBody, TransportResponse};

/// Outcome of executing one catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Display name of the catalogue entry
    pub name: String,
    /// True iff the status was 2xx and no schema check failed
    pub success: bool,
    /// HTTP status code; 0 when the transport failed
    pub status_code: u16,
    /// Failure text, present iff `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Decoded response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
    /// Wall-clock time from issuing the request to reading the full body
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// Expected-failure note matching the observed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TestResult {
    /// Result for a request that never produced a response.
    #[must_use]
    pub fn transport_failure(
        name: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            success: false,
            status_code: 0,
            error: Some(error.into()),
            response: None,
            duration,
            note: None,
        }
    }

    /// Result classified from a received response.
    #[must_use]
    pub fn from_response(
        name: impl Into<String>,
        response: &TransportResponse,
        duration: Duration,
    ) -> Self {
        let success = response.is_success();
        Self {
            name: name.into(),
            success,
            status_code: response.status,
            error: (!success).then(|| response.status_error()),
            response: Some(ResponseBody::decode(response)),
            duration,
            note: None,
        }
    }

    /// Downgrades the result because its body failed a structural check.
    ///
    /// Does nothing when `errors` is empty.
    pub fn fail_validation(&mut self, errors: &[String]) {
        if errors.is_empty() {
            return;
        }
        self.success = false;
        self.error = Some(errors.join("\n"));
    }

    /// Returns true for a failed 401/403.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        !self.success && matches!(self.status_code, 401 | 403)
    }

    /// Returns true for any failure not explained by a missing credential.
    #[must_use]
    pub const fn is_non_auth_failure(&self) -> bool {
        !self.success && !matches!(self.status_code, 401 | 403)
    }

    /// Appends remediation text for a missing credential.
    ///
    /// Only applies to 401/403 failures and only once per result; returns
    /// whether the hint was appended. A hint already present in the error
    /// text counts as applied, so results restored from a report are not
    /// hinted twice.
    pub fn apply_auth_hint(&mut self, scheme: AuthScheme) -> bool {
        if !self.is_auth_failure() || self.has_auth_hint() {
            return false;
        }
        let hint = scheme.missing_credential_hint();
        self.error = Some(match self.error.take() {
            Some(error) => format!("{error}\n{hint}"),
            None => hint,
        });
        true
    }

    fn has_auth_hint(&self) -> bool {
        let Some(error) = self.error.as_deref() else {
            return false;
        };
        [AuthScheme::Clerk, AuthScheme::Jwt]
            .into_iter()
            .any(|scheme| error.ends_with(&scheme.missing_credential_hint()))
    }
}

pub(crate) mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
