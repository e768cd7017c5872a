//! Error taxonomy for the OTP verification lifecycle.
//!
//! Every failure a caller can observe from issuance or verification maps
//! to exactly one of these variants. Infrastructure faults (database,
//! SMTP) are not represented here; they surface as `DomainError::Internal`
//! so no driver detail leaks to API clients.

use thiserror::Error;

/// Failures of the OTP issue/verify state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Verification code must be exactly 6 digits")]
    InvalidCodeFormat,

    #[error("No verification code found. Please request a new code")]
    CodeNotFound,

    #[error("Verification code has expired. Please request a new code")]
    CodeExpired,

    #[error("Maximum verification attempts exceeded. Please request a new code")]
    MaxAttemptsExceeded,

    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    InvalidCode { remaining_attempts: i32 },

    #[error("No account found for this email. Please complete registration first")]
    UserNotFound,

    #[error("Failed to deliver the verification email")]
    DeliveryFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_code_message_carries_remaining_attempts() {
        let err = OtpError::InvalidCode {
            remaining_attempts: 2,
        };
        assert!(err.to_string().contains("2 attempt(s) remaining"));
    }

    #[test]
    fn test_terminal_errors_tell_caller_to_reissue() {
        for err in [
            OtpError::CodeNotFound,
            OtpError::CodeExpired,
            OtpError::MaxAttemptsExceeded,
        ] {
            assert!(err.to_string().contains("request a new code"));
        }
    }
}
