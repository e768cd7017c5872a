use actix_web::{web, HttpResponse};

use cm_core::repositories::{OtpRepository, UserRepository};
use cm_core::services::otp::mask_email;
use cm_core::services::MailerTrait;

use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::domain_error_response;

use super::AppState;

/// Handler for POST /api/v1/auth/verify-otp
///
/// Checks a submitted code against the newest record for the email.
/// On success the user's email is marked verified and the code is
/// consumed; it cannot be replayed.
///
/// # Request Body
///
/// ```json
/// { "email": "student@campus.edu", "otp": "123456" }
/// ```
///
/// # Responses
/// - `200`: verified, returns the user snapshot
/// - `400`: malformed input, expired code, exhausted attempts, or a
///   wrong code (body carries `remaining_attempts`)
/// - `404`: no active code, or no account for the email
pub async fn verify_otp<O, U, M>(
    state: web::Data<AppState<O, U, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
    M: MailerTrait + 'static,
{
    log::info!(
        "Processing verify-otp request for email: {}",
        mask_email(&request.email)
    );

    // Shape validation is owned by the service so that malformed input
    // is rejected identically no matter the caller
    match state
        .otp_service
        .verify_code(&request.email, &request.otp)
        .await
    {
        Ok(user) => {
            log::info!(
                "Email verified for: {}, user_id: {}",
                mask_email(&request.email),
                user.id
            );
            HttpResponse::Ok().json(VerifyOtpResponse {
                verified: true,
                user,
            })
        }
        Err(error) => {
            log::warn!(
                "Verification failed for: {}, error: {:?}",
                mask_email(&request.email),
                error
            );
            domain_error_response(&error, state.expose_error_details)
        }
    }
}
