//! End-to-end tests for the OTP issuance and verification endpoints.
//!
//! The full HTTP stack is exercised against in-memory repositories and
//! a capturing mailer, so the tests see exactly what a client sees.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use tokio::sync::Mutex;

use cm_core::domain::entities::user::User;
use cm_core::repositories::{MockOtpRepository, MockUserRepository, UserRepository};
use cm_core::services::{MailerTrait, OtpService, OtpServiceConfig};

use cm_api::app::create_app;
use cm_api::routes::auth::AppState;

/// Mailer that records the last code sent to each address
struct CapturingMailer {
    sent_codes: Mutex<HashMap<String, String>>,
}

impl CapturingMailer {
    fn new() -> Self {
        Self {
            sent_codes: Mutex::new(HashMap::new()),
        }
    }

    async fn code_for(&self, email: &str) -> Option<String> {
        self.sent_codes.lock().await.get(email).cloned()
    }
}

#[async_trait]
impl MailerTrait for CapturingMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        _subject_context: &str,
    ) -> Result<String, String> {
        self.sent_codes
            .lock()
            .await
            .insert(email.to_string(), code.to_string());
        Ok(format!("captured-{}", email))
    }
}

type TestState = AppState<MockOtpRepository, MockUserRepository, CapturingMailer>;

fn build_state() -> (
    web::Data<TestState>,
    Arc<MockUserRepository>,
    Arc<CapturingMailer>,
) {
    let otp_repository = Arc::new(MockOtpRepository::new());
    let user_repository = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(CapturingMailer::new());

    let config = OtpServiceConfig {
        bcrypt_cost: 4,
        ..OtpServiceConfig::default()
    };

    let otp_service = Arc::new(OtpService::new(
        otp_repository,
        user_repository.clone(),
        mailer.clone(),
        config,
    ));

    let state = web::Data::new(AppState {
        otp_service,
        expose_error_details: false,
    });

    (state, user_repository, mailer)
}

async fn register_user(user_repository: &MockUserRepository, email: &str) {
    user_repository
        .create(User::new(email.to_string(), None))
        .await
        .unwrap();
}

#[actix_web::test]
async fn test_full_verification_flow() {
    let (state, user_repository, mailer) = build_state();
    register_user(&user_repository, "alice@campus.edu").await;

    let app = test::init_service(create_app(state)).await;

    // Issue a code
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(serde_json::json!({ "email": "alice@campus.edu" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["sent"], true);

    let code = mailer.code_for("alice@campus.edu").await.unwrap();

    // A wrong code burns an attempt and reports the remainder
    let wrong = if code == "000000" { "000001" } else { "000000" };
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(serde_json::json!({ "email": "alice@campus.edu", "otp": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_code");
    assert_eq!(body["remaining_attempts"], 2);

    // The correct code verifies and returns the user snapshot
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(serde_json::json!({ "email": "alice@campus.edu", "otp": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["verified"], true);
    assert_eq!(body["user"]["email"], "alice@campus.edu");
    assert_eq!(body["user"]["email_verified"], true);

    // The code is consumed and cannot be replayed
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(serde_json::json!({ "email": "alice@campus.edu", "otp": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_not_found");
}

#[actix_web::test]
async fn test_send_otp_rejects_malformed_email() {
    let (state, _, _) = build_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(serde_json::json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_email");
}

#[actix_web::test]
async fn test_verify_otp_rejects_malformed_code() {
    let (state, _, _) = build_state();
    let app = test::init_service(create_app(state)).await;

    for otp in ["12a456", "12345", "1234567", ""] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/verify-otp")
            .set_json(serde_json::json!({ "email": "alice@campus.edu", "otp": otp }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_code_format");
    }
}

#[actix_web::test]
async fn test_verify_otp_without_issuance_is_not_found() {
    let (state, user_repository, _) = build_state();
    register_user(&user_repository, "bob@campus.edu").await;

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(serde_json::json!({ "email": "bob@campus.edu", "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_not_found");
}

#[actix_web::test]
async fn test_verify_otp_for_unregistered_email() {
    let (state, _, mailer) = build_state();
    let app = test::init_service(create_app(state)).await;

    // A code can be issued before any account exists
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(serde_json::json!({ "email": "ghost@campus.edu" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let code = mailer.code_for("ghost@campus.edu").await.unwrap();

    // Verifying it fails on the missing account, not the code
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(serde_json::json!({ "email": "ghost@campus.edu", "otp": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_not_found");
}

#[actix_web::test]
async fn test_email_is_normalized_across_endpoints() {
    let (state, user_repository, mailer) = build_state();
    register_user(&user_repository, "carol@campus.edu").await;

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(serde_json::json!({ "email": "Carol@Campus.EDU" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Stored and delivered under the normalized address
    let code = mailer.code_for("carol@campus.edu").await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(serde_json::json!({ "email": "  CAROL@campus.edu ", "otp": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_health_check() {
    let (state, _, _) = build_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_returns_json_404() {
    let (state, _, _) = build_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
