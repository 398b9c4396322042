//! End-to-end runs of the OmniChat catalogue against scripted transports.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use omnicheck_application::{Credentials, HttpClient, HttpClientError, ResolvedAuth, RunCatalogue};
use omnicheck_domain::auth::{AuthMode, AuthRequirement, AuthScheme, BoundConfig};
use omnicheck_domain::catalogue::{KNOWN_ENDPOINT_COUNT, omnichat_catalogue};
use omnicheck_domain::request::{Payload, TransportRequest};
use omnicheck_domain::response::TransportResponse;
use omnicheck_domain::{ClientSettings, ValidatorOptions};
use pretty_assertions::assert_eq;

type Outcome = Result<TransportResponse, HttpClientError>;

/// Scripted server: public and sign-in endpoints answer by path, protected
/// endpoints return 401 without a credential.
struct ScriptedApi {
    models_body: String,
    timeout_path: Option<&'static str>,
    calls: Mutex<Vec<Call>>,
}

#[derive(Debug, Clone)]
struct Call {
    path: String,
    scheme: Option<AuthScheme>,
    payload: Payload,
}

impl ScriptedApi {
    fn new(models_body: &str) -> Self {
        Self {
            models_body: models_body.to_string(),
            timeout_path: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_timeout_on(mut self, path: &'static str) -> Self {
        self.timeout_path = Some(path);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn json(status: u16, reason: &str, body: &str) -> Outcome {
        Ok(TransportResponse::new(
            status,
            reason,
            [("Content-Type".to_string(), "application/json".to_string())],
            body.as_bytes().to_vec(),
        ))
    }

    fn respond(&self, request: &TransportRequest, config: &BoundConfig) -> Outcome {
        if self.timeout_path == Some(request.path.as_str()) {
            return Err(HttpClientError::Timeout { timeout_ms: 30_000 });
        }
        match request.path.as_str() {
            "/api/config" | "/api/openapi.json" | "/api/v1/docs" => {
                Self::json(200, "OK", r#"{"ok":true}"#)
            }
            "/api/v1/auth/apple" => Self::json(400, "Bad Request", r#"{"error":"bad token"}"#),
            "/api/v1/auth/refresh" => Self::json(401, "Unauthorized", r#"{"error":"bad"}"#),
            _ if config.credential.is_none() => {
                Self::json(401, "Unauthorized", r#"{"error":"Unauthorized"}"#)
            }
            "/api/models" => Self::json(200, "OK", &self.models_body),
            _ => Self::json(200, "OK", "{}"),
        }
    }
}

impl HttpClient for ScriptedApi {
    fn execute<'a>(
        &'a self,
        request: &'a TransportRequest,
        config: &'a BoundConfig,
    ) -> Pin<Box<dyn Future<Output = Outcome> + Send + 'a>> {
        self.calls.lock().unwrap().push(Call {
            path: request.path.clone(),
            scheme: config.scheme(),
            payload: request.payload.clone(),
        });
        let outcome = self.respond(request, config);
        Box::pin(async move { outcome })
    }
}

const VALID_MODELS: &str = r#"{
    "providers": {
        "openai": [
            {
                "id": "m1",
                "name": "M1",
                "provider": "openai",
                "contextWindow": 128000,
                "maxOutput": 4096
            }
        ]
    }
}"#;

fn runner(
    api: ScriptedApi,
    clerk: Option<&str>,
    jwt: Option<&str>,
) -> (Arc<ScriptedApi>, RunCatalogue<ScriptedApi>) {
    let api = Arc::new(api);
    let auth = ResolvedAuth::resolve(
        &ClientSettings::default(),
        Credentials::new(clerk.map(str::to_string), jwt.map(str::to_string)),
    );
    (Arc::clone(&api), RunCatalogue::new(api, auth))
}

#[tokio::test]
async fn public_entries_are_anonymous_in_every_mode() {
    let catalogue = omnichat_catalogue();
    let modes = [
        (None, None),
        (Some("clerk"), None),
        (None, Some("jwt")),
        (Some("clerk"), Some("jwt")),
    ];

    for (clerk, jwt) in modes {
        let (api, runner) = runner(ScriptedApi::new(VALID_MODELS), clerk, jwt);
        runner.run(&catalogue).await;

        for (spec, call) in catalogue.iter().zip(api.calls()) {
            assert_eq!(spec.path, call.path);
            let expected = match spec.auth {
                AuthRequirement::None => None,
                AuthRequirement::Clerk => clerk.map(|_| AuthScheme::Clerk),
                AuthRequirement::Jwt => jwt.map(|_| AuthScheme::Jwt),
            };
            assert_eq!(call.scheme, expected, "{}", spec.name);
        }
    }
}

#[tokio::test]
async fn results_follow_catalogue_order() {
    let catalogue = omnichat_catalogue();
    let (_, runner) = runner(ScriptedApi::new(VALID_MODELS), Some("c"), Some("j"));
    let context = runner.execute(&catalogue).await.unwrap();

    let names: Vec<_> = context.results.iter().map(|r| r.name.clone()).collect();
    let expected: Vec<_> = catalogue.iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, expected);
    assert_eq!(context.mode, AuthMode::Both);
}

#[tokio::test]
async fn empty_provider_map_fails_the_models_entry() {
    let (_, runner) = runner(ScriptedApi::new(r#"{"providers": {}}"#), Some("c"), None);
    let context = runner.run(&omnichat_catalogue()).await;

    let models = context
        .results
        .iter()
        .find(|r| r.name == "GET /api/models")
        .unwrap();
    assert_eq!(models.status_code, 200);
    assert!(!models.success);
    assert_eq!(models.error.as_deref(), Some("No providers found"));
    assert!(context.has_non_auth_failures());
}

#[tokio::test]
async fn valid_model_catalogue_passes() {
    let (_, runner) = runner(ScriptedApi::new(VALID_MODELS), Some("c"), None);
    let context = runner.run(&omnichat_catalogue()).await;

    let models = context
        .results
        .iter()
        .find(|r| r.name == "GET /api/models")
        .unwrap();
    assert!(models.success);
    assert_eq!(models.error, None);
}

#[tokio::test]
async fn lenient_options_accept_provider_mismatch() {
    let body = VALID_MODELS.replace(r#""provider": "openai""#, r#""provider": "azure""#);

    let (_, strict) = runner(ScriptedApi::new(&body), Some("c"), None);
    let strict_result = strict.run(&omnichat_catalogue()).await;
    assert!(strict_result.has_non_auth_failures());

    let (_, lenient) = runner(ScriptedApi::new(&body), Some("c"), None);
    let lenient = lenient.with_options(ValidatorOptions {
        strict_provider_match: false,
    });
    let lenient_result = lenient.run(&omnichat_catalogue()).await;
    assert!(!lenient_result.has_non_auth_failures());
}

#[tokio::test]
async fn unauthenticated_run_has_only_auth_failures() {
    let catalogue = omnichat_catalogue();
    let (_, runner) = runner(ScriptedApi::new(VALID_MODELS), None, None);
    let context = runner.run(&catalogue).await;

    // The Apple sign-in entry answers 400 with a mock token.
    let non_auth: Vec<_> = context
        .results
        .iter()
        .filter(|r| r.is_non_auth_failure())
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(non_auth, vec!["POST /api/v1/auth/apple"]);

    let protected: Vec<_> = context.results.iter().skip(5).collect();
    assert!(protected.iter().all(|r| r.status_code == 401));
    assert!(protected.iter().all(|r| {
        r.error
            .as_deref()
            .is_some_and(|e| e.contains("Use --clerk flag") || e.contains("Use --bearer flag"))
    }));

    let summary = context.aggregate(KNOWN_ENDPOINT_COUNT).summary;
    assert_eq!(summary.total, catalogue.len());
    assert_eq!(summary.coverage.exercised, catalogue.len());
    assert_eq!(summary.coverage.known_total, 43);
    assert_eq!(summary.auth_required, 28);
}

#[tokio::test]
async fn protected_401s_alone_do_not_fail_the_run() {
    let catalogue: Vec<_> = omnichat_catalogue()
        .into_iter()
        .filter(|s| s.auth != AuthRequirement::None || s.path == "/api/config")
        .collect();
    let (_, runner) = runner(ScriptedApi::new(VALID_MODELS), None, None);
    let context = runner.run(&catalogue).await;

    assert!(!context.has_non_auth_failures());
    let summary = context.aggregate(KNOWN_ENDPOINT_COUNT).summary;
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, summary.auth_required);
}

#[tokio::test]
async fn timeout_does_not_stop_the_run() {
    let catalogue = omnichat_catalogue();
    let api = ScriptedApi::new(VALID_MODELS).with_timeout_on("/api/openapi.json");
    let (api, runner) = runner(api, None, None);
    let context = runner.run(&catalogue).await;

    let timed_out = &context.results[1];
    assert_eq!(timed_out.name, "GET /api/openapi.json");
    assert_eq!(timed_out.status_code, 0);
    assert!(!timed_out.success);
    assert!(timed_out.error.as_deref().unwrap().contains("timed out"));

    assert_eq!(context.results.len(), catalogue.len());
    assert_eq!(api.calls().len(), catalogue.len());
    assert!(context.results[2].success);
}

#[tokio::test]
async fn uploads_send_multipart_payloads() {
    let (api, runner) = runner(ScriptedApi::new(VALID_MODELS), Some("c"), Some("j"));
    runner.run(&omnichat_catalogue()).await;

    let upload = api
        .calls()
        .into_iter()
        .find(|c| c.path == "/api/v1/upload")
        .unwrap();
    let Payload::Multipart(form) = &upload.payload else {
        panic!("expected multipart payload, got {:?}", upload.payload);
    };
    assert_eq!(form.file.file_name, "test-v1.txt");
    assert_eq!(form.fields[0].name, "conversationId");
}
