//! Types for OTP service results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::otp_code::OtpCode;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueCodeResult {
    /// The persisted OTP record (hash only, no plaintext)
    pub otp: OtpCode,
    /// The mailer's message id for the delivery
    pub message_id: String,
}

/// User summary returned after a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub id: Uuid,
    pub email: String,
    pub email_verified: bool,
}
