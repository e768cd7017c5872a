use actix_web::{web, HttpResponse};
use validator::Validate;

use cm_core::repositories::{OtpRepository, UserRepository};
use cm_core::services::otp::mask_email;
use cm_core::services::MailerTrait;

use crate::dto::{ErrorResponse, SendOtpRequest, SendOtpResponse};
use crate::handlers::domain_error_response;

use super::AppState;

/// Handler for POST /api/v1/auth/send-otp
///
/// Issues a fresh verification code and emails it to the address in
/// the request body.
///
/// # Request Body
///
/// ```json
/// { "email": "student@campus.edu" }
/// ```
///
/// # Responses
/// - `200`: code issued and emailed, `{ "sent": true, "message": ... }`
/// - `400`: missing or malformed email address
/// - `503`: email delivery failed
pub async fn send_otp<O, U, M>(
    state: web::Data<AppState<O, U, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
    M: MailerTrait + 'static,
{
    if request.0.validate().is_err() {
        log::warn!("Rejected send-otp request with malformed email");
        return ErrorResponse::new(
            "invalid_email".to_string(),
            "A valid email address is required".to_string(),
        )
        .to_response(actix_web::http::StatusCode::BAD_REQUEST);
    }

    log::info!(
        "Processing send-otp request for email: {}",
        mask_email(&request.email)
    );

    match state.otp_service.issue_code(&request.email).await {
        Ok(result) => {
            log::info!(
                "Verification code sent to: {}, message_id: {}",
                mask_email(&request.email),
                result.message_id
            );
            HttpResponse::Ok().json(SendOtpResponse {
                sent: true,
                message: "Verification code sent. Please check your email".to_string(),
            })
        }
        Err(error) => {
            log::error!(
                "Failed to send verification code to: {}, error: {:?}",
                mask_email(&request.email),
                error
            );
            domain_error_response(&error, state.expose_error_details)
        }
    }
}
