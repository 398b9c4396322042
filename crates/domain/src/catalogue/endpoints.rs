//! The OmniChat endpoint catalogue

use serde_json::json;

use super::{ResponseCheck, TestSpec};
use crate::auth::AuthRequirement;
use crate::request::{FilePart, HttpMethod, MultipartForm, RequestBody};

/// Number of endpoints the OmniChat API exposes in total.
///
/// Coverage is reported against this figure, not against the catalogue
/// length, since some endpoints (streaming, webhooks) are not exercised.
pub const KNOWN_ENDPOINT_COUNT: usize = 43;

const TEST_MODEL: &str = "gpt-4o-mini";
const RETURN_URL: &str = "http://localhost:3000/billing";

fn upload_form(file_name: &str, content: &str) -> RequestBody {
    RequestBody::Multipart(
        MultipartForm::new(FilePart::new("file", file_name, content))
            .field("conversationId", "test-id"),
    )
}

fn public() -> Vec<TestSpec> {
    vec![
        TestSpec::new(HttpMethod::Get, "/api/config"),
        TestSpec::new(HttpMethod::Get, "/api/openapi.json"),
        TestSpec::new(HttpMethod::Get, "/api/v1/docs"),
    ]
}

fn sign_in() -> Vec<TestSpec> {
    let apple = json!({
        "idToken": "mock-apple-jwt-token",
        "user": {
            "email": "test@example.com",
            "name": { "firstName": "Test", "lastName": "User" }
        }
    });
    let refresh = json!({ "refreshToken": "mock-refresh-token" });

    vec![
        TestSpec::new(HttpMethod::Post, "/api/v1/auth/apple")
            .body(RequestBody::Json(apple))
            .note(400, "Expected: Requires valid Apple ID token"),
        TestSpec::new(HttpMethod::Post, "/api/v1/auth/refresh")
            .body(RequestBody::Json(refresh))
            .note(401, "Expected: Requires valid refresh token"),
    ]
}

fn web_app() -> Vec<TestSpec> {
    let chat = json!({
        "messages": [{ "role": "user", "content": "Hello, this is a test message" }],
        "model": TEST_MODEL,
        "conversationId": "test-conversation",
        "stream": false
    });
    let new_conversation = json!({
        "title": "Test Conversation",
        "model": TEST_MODEL
    });
    let message = json!({
        "role": "user",
        "content": "Test message",
        "model": TEST_MODEL
    });
    let checkout_session = json!({
        "type": "subscription",
        "planId": "monthly",
        "returnUrl": RETURN_URL
    });

    let specs = vec![
        TestSpec::new(HttpMethod::Post, "/api/chat").body(RequestBody::Json(chat)),
        TestSpec::new(HttpMethod::Get, "/api/models").check(ResponseCheck::ModelCatalogue),
        TestSpec::new(HttpMethod::Get, "/api/conversations"),
        TestSpec::new(HttpMethod::Post, "/api/conversations")
            .body(RequestBody::Json(new_conversation)),
        TestSpec::named(
            "DELETE /api/conversations/{id}",
            HttpMethod::Delete,
            "/api/conversations/test-id",
        ),
        TestSpec::named(
            "GET /api/conversations/{id}/messages",
            HttpMethod::Get,
            "/api/conversations/test-id/messages",
        ),
        TestSpec::named(
            "POST /api/conversations/{id}/messages",
            HttpMethod::Post,
            "/api/conversations/test-id/messages",
        )
        .body(RequestBody::Json(message)),
        TestSpec::named(
            "POST /api/upload (multipart)",
            HttpMethod::Post,
            "/api/upload",
        )
        .body(upload_form("test.txt", "test file content")),
        TestSpec::new(HttpMethod::Get, "/api/upload?key=test"),
        TestSpec::new(HttpMethod::Get, "/api/search?q=test"),
        TestSpec::new(HttpMethod::Get, "/api/battery"),
        TestSpec::new(HttpMethod::Get, "/api/user/tier"),
        TestSpec::new(HttpMethod::Post, "/api/stripe/checkout")
            .body(RequestBody::Json(checkout_session)),
        TestSpec::new(HttpMethod::Get, "/api/stripe/checkout"),
        TestSpec::new(HttpMethod::Post, "/api/stripe/portal")
            .body(RequestBody::Json(json!({ "returnUrl": RETURN_URL }))),
    ];
    specs
        .into_iter()
        .map(|spec| spec.auth(AuthRequirement::Clerk))
        .collect()
}

fn versioned_api() -> Vec<TestSpec> {
    let conversation = json!({
        "title": "Test V1 Conversation",
        "model": TEST_MODEL
    });
    let rename = json!({
        "title": "Updated Title",
        "isArchived": true
    });
    let message = json!({
        "content": "Test V1 message",
        "stream": false
    });

    let specs = vec![
        TestSpec::new(HttpMethod::Get, "/api/v1/conversations"),
        TestSpec::new(HttpMethod::Post, "/api/v1/conversations")
            .body(RequestBody::Json(conversation)),
        TestSpec::named(
            "GET /api/v1/conversations/{id}",
            HttpMethod::Get,
            "/api/v1/conversations/test-id",
        ),
        TestSpec::named(
            "PATCH /api/v1/conversations/{id}",
            HttpMethod::Patch,
            "/api/v1/conversations/test-id",
        )
        .body(RequestBody::Json(rename)),
        TestSpec::named(
            "DELETE /api/v1/conversations/{id}",
            HttpMethod::Delete,
            "/api/v1/conversations/test-id",
        ),
        TestSpec::named(
            "GET /api/v1/conversations/{id}/messages",
            HttpMethod::Get,
            "/api/v1/conversations/test-id/messages",
        ),
        TestSpec::named(
            "POST /api/v1/conversations/{id}/messages",
            HttpMethod::Post,
            "/api/v1/conversations/test-id/messages",
        )
        .body(RequestBody::Json(message)),
        TestSpec::new(HttpMethod::Get, "/api/v1/user/profile"),
        TestSpec::new(HttpMethod::Patch, "/api/v1/user/profile")
            .body(RequestBody::Json(json!({ "name": "Updated Test User" }))),
        TestSpec::new(HttpMethod::Get, "/api/v1/user/usage"),
        TestSpec::named(
            "POST /api/v1/upload (multipart)",
            HttpMethod::Post,
            "/api/v1/upload",
        )
        .body(upload_form("test-v1.txt", "test v1 file content")),
        TestSpec::named(
            "GET /api/v1/files/{key}",
            HttpMethod::Get,
            "/api/v1/files/test-key",
        ),
    ];
    specs
        .into_iter()
        .map(|spec| spec.auth(AuthRequirement::Jwt))
        .collect()
}

/// The full OmniChat catalogue in execution order: public endpoints, sign-in,
/// Clerk-protected web-app endpoints, then the JWT-protected v1 API.
#[must_use]
pub fn omnichat_catalogue() -> Vec<TestSpec> {
    [public(), sign_in(), web_app(), versioned_api()].concat()
}
