//! Configuration for the OTP lifecycle service

use crate::domain::entities::otp_code::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before an issued code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of wrong-code submissions allowed
    pub max_attempts: i32,
    /// bcrypt cost factor for code hashing (lowered in tests)
    pub bcrypt_cost: u32,
    /// Context string handed to the mailer for the email subject line
    pub subject_context: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            subject_context: "CampusMate account verification".to_string(),
        }
    }
}
