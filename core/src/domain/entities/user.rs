//! User entity representing a registered account in the CampusMate system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized email address, unique across users
    pub email: String,

    /// Optional display name shown in the chat client
    pub display_name: Option<String>,

    /// Whether the email address has been verified via OTP
    pub email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance with an unverified email
    pub fn new(email: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user's email as verified.
    ///
    /// Idempotent: calling this on an already-verified user is a no-op
    /// success. There is no transition back to unverified.
    pub fn verify_email(&mut self) {
        if !self.email_verified {
            self.email_verified = true;
            self.updated_at = Utc::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new("alice@example.com".to_string(), Some("Alice".to_string()));

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
        assert!(!user.email_verified);
    }

    #[test]
    fn test_verify_email() {
        let mut user = User::new("alice@example.com".to_string(), None);

        assert!(!user.email_verified);
        user.verify_email();
        assert!(user.email_verified);
    }

    #[test]
    fn test_verify_email_is_idempotent() {
        let mut user = User::new("alice@example.com".to_string(), None);

        user.verify_email();
        let updated_at = user.updated_at;

        // Second call must not error or touch the record
        user.verify_email();
        assert!(user.email_verified);
        assert_eq!(user.updated_at, updated_at);
    }

    #[test]
    fn test_serialization() {
        let user = User::new("alice@example.com".to_string(), None);

        let json = serde_json::to_string(&user).unwrap();
        let deserialized: User = serde_json::from_str(&json).unwrap();

        assert_eq!(user, deserialized);
    }
}
