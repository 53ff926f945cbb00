use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use url::Url;

use storefront_auth::infra::mail::{LogMailer, MailTransport};
use storefront_auth::router::build_router;
use storefront_auth::state::AppState;
use storefront_auth_types::cookie::CUSTOMER_SESSION_COOKIE;
use storefront_core::middleware::X_REQUEST_ID;
use storefront_testing::auth::MockSession;

use crate::helpers::TEST_JWT_SECRET;

/// Collaborators point at a closed local port, so any call that reaches them fails fast.
fn server() -> TestServer {
    let unreachable = Url::parse("http://127.0.0.1:9").unwrap();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        http: reqwest::Client::new(),
        identity_provider_url: unreachable.clone(),
        customer_directory_url: unreachable,
        mailer: MailTransport::Log(LogMailer {
            from: "no-reply@localhost".to_owned(),
        }),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        cookie_domain: "localhost".to_owned(),
        reset_link_base: Url::parse("http://localhost:3000").unwrap(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let server = server();
    let resp = server.get("/healthz").await;
    assert_eq!(resp.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = server();
    let resp = server.get("/readyz").await;
    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_invalid_email_on_register() {
    let server = server();
    let resp = server
        .post("/store/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "secret1" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email");
}

#[tokio::test]
async fn should_reject_short_password_on_register() {
    let server = server();
    let resp = server
        .post("/store/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "12345" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["message"], "password must be at least 6 characters");
}

#[tokio::test]
async fn should_treat_missing_fields_as_validation_errors() {
    let server = server();
    let resp = server
        .post("/store/auth/verify-otp")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["message"], "code must be at least 4 characters");
}

#[tokio::test]
async fn should_hide_collaborator_outage_on_register() {
    let server = server();
    let resp = server
        .post("/store/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "secret1" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn should_accept_forgot_password_even_when_collaborators_fail() {
    let server = server();
    let resp = server
        .post("/store/auth/forgot-password")
        .json(&json!({ "email": "someone@example.com" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::OK);
    let body: Value = resp.json();
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "If an account exists, a reset email has been sent.",
        })
    );
}

#[tokio::test]
async fn should_require_long_enough_reset_token() {
    let server = server();
    let resp = server
        .post("/store/auth/reset-password/emailpass")
        .json(&json!({ "token": "short", "password": "newpass1" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["message"], "token must be at least 10 characters");
}

#[tokio::test]
async fn should_require_session_for_change_password() {
    let server = server();
    let resp = server
        .post("/store/auth/change-password")
        .json(&json!({
            "current_password": "oldpass",
            "new_password": "newpass1",
            "confirm_password": "newpass1",
        }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn should_reject_mismatched_passwords_before_any_lookup() {
    let session = MockSession::new("cus_1", TEST_JWT_SECRET);
    let server = server();
    let mut request = server.post("/store/auth/change-password");
    for (name, value) in session.bearer_headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    let resp = request
        .json(&json!({
            "current_password": "oldpass",
            "new_password": "newpass1",
            "confirm_password": "newpass2",
        }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["message"], "Passwords do not match");
}

#[tokio::test]
async fn should_reject_malformed_login_like_wrong_credentials() {
    let server = server();
    let resp = server
        .post("/store/auth/login")
        .json(&json!({ "email": "nope", "password": "x" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn should_clear_session_cookie_on_logout() {
    let server = server();
    let resp = server.delete("/store/auth/session").await;
    assert_eq!(resp.status_code(), StatusCode::OK);
    let cookie = resp.cookie(CUSTOMER_SESSION_COOKIE);
    assert_eq!(cookie.value(), "");
}

#[tokio::test]
async fn should_echo_request_id() {
    let server = server();
    let resp = server
        .get("/healthz")
        .add_header(
            axum::http::HeaderName::from_static(X_REQUEST_ID),
            axum::http::HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(resp.headers().get(X_REQUEST_ID).unwrap(), "req-123");
}

#[tokio::test]
async fn should_reject_non_json_body_with_envelope() {
    let server = server();
    let resp = server
        .post("/store/auth/verify-otp")
        .text("email=a@x.com&code=123456")
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(
        body,
        json!({ "success": false, "message": "Invalid request body" })
    );
}

#[tokio::test]
async fn should_reject_mistyped_field_without_parser_detail() {
    let server = server();
    let resp = server
        .post("/store/auth/forgot-password")
        .json(&json!({ "email": 123 }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn should_accept_session_cookie_for_change_password() {
    let session = MockSession::new("cus_1", TEST_JWT_SECRET);
    let server = server();
    let mut request = server.post("/store/auth/change-password");
    for (name, value) in session.cookie_headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    let resp = request
        .json(&json!({
            "current_password": "oldpass",
            "new_password": "newpass1",
            "confirm_password": "newpass2",
        }))
        .await;
    // Past the session extractor: the mismatch check answers, not a 401.
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["message"], "Passwords do not match");
}
