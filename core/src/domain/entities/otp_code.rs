//! One-time password record for email-based account verification.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of wrong-code submissions tolerated before the
/// record is purged and the caller must request a new code
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// One-time password record bound to an email address.
///
/// The plaintext code is never stored; only its bcrypt digest. Multiple
/// records may exist for the same email — the most recently created one
/// is authoritative and older records are simply ignored by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Normalized (trimmed, lower-cased) email the code was issued for
    pub email: String,

    /// One-way bcrypt hash of the 6-digit code
    pub code_hash: String,

    /// Number of failed verification attempts made so far
    pub attempts: i32,

    /// Set true immediately before the record is consumed
    pub verified: bool,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Creates a new record with the default 5-minute expiry.
    ///
    /// The caller supplies the hash; hashing lives in the service layer
    /// so this entity never sees the plaintext code.
    pub fn new(email: String, code_hash: String) -> Self {
        Self::new_with_expiration(email, code_hash, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new record with a custom expiration time.
    pub fn new_with_expiration(email: String, code_hash: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            code_hash,
            attempts: 0,
            verified: false,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code using the OS CSPRNG.
    ///
    /// The range is 000000-999999; leading zeros are allowed.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the attempt ceiling has been reached
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= MAX_ATTEMPTS
    }

    /// Number of remaining verification attempts (0 if exhausted)
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_new_otp_code() {
        let code = OtpCode::new("alice@example.com".to_string(), "$2b$hash".to_string());

        assert_eq!(code.email, "alice@example.com");
        assert_eq!(code.attempts, 0);
        assert!(!code.verified);
        assert!(!code.is_expired());
        assert!(!code.is_exhausted());
        assert_eq!(code.remaining_attempts(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_expiration_window() {
        let code = OtpCode::new("alice@example.com".to_string(), "$2b$hash".to_string());
        let expected = code.created_at + Duration::minutes(DEFAULT_EXPIRATION_MINUTES);
        assert_eq!(code.expires_at, expected);
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = OtpCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let num: u32 = code.parse().expect("generated code should parse as a number");
            assert!(num < 1_000_000);
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| OtpCode::generate_code()).collect();

        // Extremely unlikely to get all identical codes
        let unique_count = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique_count > 1);
    }

    #[test]
    fn test_is_expired() {
        let code = OtpCode::new_with_expiration(
            "alice@example.com".to_string(),
            "$2b$hash".to_string(),
            0,
        );

        thread::sleep(StdDuration::from_millis(10));

        assert!(code.is_expired());
    }

    #[test]
    fn test_exhaustion() {
        let mut code = OtpCode::new("alice@example.com".to_string(), "$2b$hash".to_string());

        code.attempts = MAX_ATTEMPTS - 1;
        assert!(!code.is_exhausted());
        assert_eq!(code.remaining_attempts(), 1);

        code.attempts = MAX_ATTEMPTS;
        assert!(code.is_exhausted());
        assert_eq!(code.remaining_attempts(), 0);

        // Counter past the ceiling never reports negative attempts
        code.attempts = MAX_ATTEMPTS + 2;
        assert_eq!(code.remaining_attempts(), 0);
    }

    #[test]
    fn test_serialization() {
        let code = OtpCode::new("alice@example.com".to_string(), "$2b$hash".to_string());

        let json = serde_json::to_string(&code).unwrap();
        let deserialized: OtpCode = serde_json::from_str(&json).unwrap();

        assert_eq!(code, deserialized);
    }
}
