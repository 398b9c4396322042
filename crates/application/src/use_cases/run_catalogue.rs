//! Run Catalogue Use Case
//!
//! Executes every catalogue entry in order through the transport port,
//! validates structurally checked responses, then appends auth hints.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use omnicheck_domain::auth::AuthMode;
use omnicheck_domain::catalogue::{ResponseCheck, TestSpec, validate_catalogue};
use omnicheck_domain::report::{Aggregate, aggregate, has_non_auth_failures};
use omnicheck_domain::request::{Payload, RequestBody, TransportRequest};
use omnicheck_domain::response::ResponseBody;
use omnicheck_domain::validation::validate_model_catalogue;
use omnicheck_domain::{TestResult, ValidatorOptions};
use tracing::{debug, warn};

use crate::auth::ResolvedAuth;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpClient;

/// State of one run: the auth mode and the results in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    /// Auth mode the run used
    pub mode: AuthMode,
    /// One result per catalogue entry, in declaration order
    pub results: Vec<TestResult>,
}

impl RunContext {
    /// Creates an empty run.
    #[must_use]
    pub const fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            results: Vec::new(),
        }
    }

    /// Category and run statistics against `known_total` endpoints.
    #[must_use]
    pub fn aggregate(&self, known_total: usize) -> Aggregate {
        aggregate(&self.results, known_total)
    }

    /// Returns true if any failure is not explained by a missing credential.
    #[must_use]
    pub fn has_non_auth_failures(&self) -> bool {
        has_non_auth_failures(&self.results)
    }
}

/// Use case for running a catalogue against the API.
///
/// Entries run strictly one after another; each is attempted exactly once
/// and a failing entry never stops the ones after it.
pub struct RunCatalogue<C: HttpClient> {
    client: Arc<C>,
    auth: ResolvedAuth,
    options: ValidatorOptions,
}

impl<C: HttpClient> RunCatalogue<C> {
    /// Creates the use case with strict model validation.
    pub fn new(client: Arc<C>, auth: ResolvedAuth) -> Self {
        Self {
            client,
            auth,
            options: ValidatorOptions::default(),
        }
    }

    /// Overrides the model validator options.
    #[must_use]
    pub const fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// The resolved authentication this run uses.
    pub const fn auth(&self) -> &ResolvedAuth {
        &self.auth
    }

    /// Validates the catalogue, then runs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue is empty or malformed. Endpoint
    /// failures are recorded in the results, never returned.
    pub async fn execute(&self, catalogue: &[TestSpec]) -> ApplicationResult<RunContext> {
        if catalogue.is_empty() {
            return Err(ApplicationError::EmptyCatalogue);
        }
        validate_catalogue(catalogue)?;
        Ok(self.run(catalogue).await)
    }

    /// Runs every entry in order and applies the auth-hint pass.
    pub async fn run(&self, catalogue: &[TestSpec]) -> RunContext {
        let mut context = RunContext::new(self.auth.mode());
        for spec in catalogue {
            let result = self.run_spec(spec).await;
            context.results.push(result);
        }
        apply_auth_hints(&self.auth, catalogue, &mut context.results);
        context
    }

    /// Runs a single entry.
    pub async fn run_spec(&self, spec: &TestSpec) -> TestResult {
        let config = self.auth.config_for(spec.auth);

        let body = spec.body.as_ref().map(RequestBody::to_payload);
        let payload = match body.transpose() {
            Ok(payload) => payload.unwrap_or(Payload::None),
            Err(e) => {
                warn!(endpoint = %spec.name, error = %e, "could not build request body");
                return TestResult::transport_failure(&spec.name, e.to_string(), Duration::ZERO);
            }
        };
        let request = TransportRequest::new(spec.method, &spec.path).with_payload(payload);

        let start = Instant::now();
        let outcome = self.client.execute(&request, config).await;
        let duration = start.elapsed();

        let mut result = match outcome {
            Ok(response) => TestResult::from_response(&spec.name, &response, duration),
            Err(e) => {
                warn!(
                    endpoint = %spec.name,
                    error = %e,
                    timeout = e.is_timeout(),
                    "transport error"
                );
                TestResult::transport_failure(&spec.name, e.to_string(), duration)
            }
        };

        if result.success && spec.check == ResponseCheck::ModelCatalogue {
            let errors = self.check_model_catalogue(result.response.as_ref());
            if !errors.is_empty() {
                warn!(
                    endpoint = %spec.name,
                    count = errors.len(),
                    "model catalogue failed validation"
                );
            }
            result.fail_validation(&errors);
        }
        result.note = spec.note_for(result.status_code).map(str::to_string);

        debug!(
            endpoint = %spec.name,
            status = result.status_code,
            success = result.success,
            elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            authenticated = config.credential.is_some(),
            "endpoint checked"
        );
        result
    }

    fn check_model_catalogue(&self, body: Option<&ResponseBody>) -> Vec<String> {
        match body.and_then(ResponseBody::as_json) {
            Some(json) => validate_model_catalogue(json, self.options),
            None => vec!["Response is not a JSON object".to_string()],
        }
    }
}

/// Appends a credential hint to every 401/403 whose scheme was not supplied.
///
/// Results are matched to entries by name. Safe to call repeatedly: a
/// result is hinted at most once.
pub fn apply_auth_hints(
    auth: &ResolvedAuth,
    catalogue: &[TestSpec],
    results: &mut [TestResult],
) {
    let by_name: HashMap<&str, &TestSpec> =
        catalogue.iter().map(|s| (s.name.as_str(), s)).collect();
    for result in results.iter_mut() {
        let scheme = by_name
            .get(result.name.as_str())
            .and_then(|spec| spec.auth.scheme());
        if let Some(scheme) = scheme
            && !auth.is_bound(scheme)
        {
            result.apply_auth_hint(scheme);
        }
    }
}
