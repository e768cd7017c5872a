//! Mapping from domain errors to HTTP responses.
//!
//! Every error leaves the API as an `ErrorResponse` body with a stable
//! machine-readable `error` code. Internal details are only exposed
//! when the server is explicitly configured to do so.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use cm_core::errors::{DomainError, OtpError};

use crate::dto::ErrorResponse;

/// Convert a domain error into its HTTP response.
///
/// `expose_details` controls whether internal error messages are
/// included in the body; keep it off outside development.
pub fn domain_error_response(error: &DomainError, expose_details: bool) -> HttpResponse {
    match error {
        DomainError::Otp(otp_error) => otp_error_response(otp_error),
        DomainError::Validation { message } => {
            ErrorResponse::new("validation_error".to_string(), message.clone())
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::NotFound { resource } => ErrorResponse::new(
            "not_found".to_string(),
            format!("{} not found", resource),
        )
        .to_response(StatusCode::NOT_FOUND),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            let mut response = ErrorResponse::new(
                "internal_error".to_string(),
                "An internal error occurred".to_string(),
            );
            if expose_details {
                let mut details = HashMap::new();
                details.insert("cause".to_string(), serde_json::json!(message));
                response = response.with_details(details);
            }
            response.to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn otp_error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::InvalidEmail => ErrorResponse::new(
            "invalid_email".to_string(),
            "A valid email address is required".to_string(),
        )
        .to_response(StatusCode::BAD_REQUEST),

        OtpError::InvalidCodeFormat => ErrorResponse::new(
            "invalid_code_format".to_string(),
            "Verification code must be exactly 6 digits".to_string(),
        )
        .to_response(StatusCode::BAD_REQUEST),

        OtpError::CodeNotFound => ErrorResponse::new(
            "code_not_found".to_string(),
            "No verification code found for this email. Please request a new one".to_string(),
        )
        .to_response(StatusCode::NOT_FOUND),

        OtpError::CodeExpired => ErrorResponse::new(
            "code_expired".to_string(),
            "Verification code has expired. Please request a new one".to_string(),
        )
        .to_response(StatusCode::BAD_REQUEST),

        OtpError::MaxAttemptsExceeded => ErrorResponse::new(
            "max_attempts_exceeded".to_string(),
            "Too many incorrect attempts. Please request a new code".to_string(),
        )
        .to_response(StatusCode::BAD_REQUEST),

        OtpError::InvalidCode { remaining_attempts } => ErrorResponse::new(
            "invalid_code".to_string(),
            "Incorrect verification code".to_string(),
        )
        .with_remaining_attempts(*remaining_attempts)
        .to_response(StatusCode::BAD_REQUEST),

        OtpError::UserNotFound => ErrorResponse::new(
            "user_not_found".to_string(),
            "No account found for this email".to_string(),
        )
        .to_response(StatusCode::NOT_FOUND),

        OtpError::DeliveryFailure => ErrorResponse::new(
            "email_delivery_failed".to_string(),
            "Failed to send the verification email. Please try again later".to_string(),
        )
        .to_response(StatusCode::SERVICE_UNAVAILABLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_code_maps_to_400() {
        let error = DomainError::Otp(OtpError::InvalidCode {
            remaining_attempts: 2,
        });
        let response = domain_error_response(&error, false);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_code_not_found_maps_to_404() {
        let error = DomainError::Otp(OtpError::CodeNotFound);
        let response = domain_error_response(&error, false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_user_not_found_maps_to_404() {
        let error = DomainError::Otp(OtpError::UserNotFound);
        let response = domain_error_response(&error, false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_delivery_failure_maps_to_503() {
        let error = DomainError::Otp(OtpError::DeliveryFailure);
        let response = domain_error_response(&error, false);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let error = DomainError::Internal {
            message: "pool exhausted".to_string(),
        };
        let response = domain_error_response(&error, false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
