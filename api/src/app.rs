//! Application factory
//!
//! Builds the Actix-web application from an injected application
//! state, so both the production binary and the integration tests
//! assemble the exact same route table.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use cm_core::repositories::{OtpRepository, UserRepository};
use cm_core::services::MailerTrait;

use crate::middleware::cors::create_cors;
use crate::routes::auth::{send_otp, verify_otp, AppState};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<O, U, M>(
    app_state: web::Data<AppState<O, U, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
    M: MailerTrait + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/send-otp", web::post().to(send_otp::<O, U, M>))
                    .route("/verify-otp", web::post().to(verify_otp::<O, U, M>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
