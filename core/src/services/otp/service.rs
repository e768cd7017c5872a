//! OTP lifecycle manager implementation

use std::sync::Arc;

use crate::domain::entities::otp_code::{OtpCode, CODE_LENGTH};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::{OtpRepository, UserRepository};

use super::config::OtpServiceConfig;
use super::hasher::CodeHasher;
use super::traits::MailerTrait;
use super::types::{IssueCodeResult, VerifiedUser};

/// Normalize an email address for use as a lookup key.
///
/// All store access keys on the normalized form; raw client input is
/// never used directly.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Mask an email address for log output
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Service orchestrating OTP issuance and verification.
///
/// Each request is an independent, stateless unit of work against the
/// injected repositories; there is no shared mutable state between
/// requests and no global store handle. Expiry is checked lazily at
/// verification time, never by a background sweeper.
pub struct OtpService<O: OtpRepository, U: UserRepository, M: MailerTrait> {
    /// OTP record storage
    otp_repository: Arc<O>,
    /// User record storage
    user_repository: Arc<U>,
    /// Outbound email channel
    mailer: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
    /// One-way hasher for codes
    hasher: CodeHasher,
}

impl<O: OtpRepository, U: UserRepository, M: MailerTrait> OtpService<O, U, M> {
    /// Create a new OTP service
    pub fn new(
        otp_repository: Arc<O>,
        user_repository: Arc<U>,
        mailer: Arc<M>,
        config: OtpServiceConfig,
    ) -> Self {
        let hasher = CodeHasher::with_cost(config.bcrypt_cost);
        Self {
            otp_repository,
            user_repository,
            mailer,
            config,
            hasher,
        }
    }

    /// Issue a verification code to an email address.
    ///
    /// Generates a fresh 6-digit code, persists its hash with
    /// `attempts = 0`, and emails the plaintext code. Older records for
    /// the same email are superseded, not deleted: only the newest
    /// record is consulted by verification.
    ///
    /// A delivery failure is reported as `OtpError::DeliveryFailure`
    /// but does not roll back the created record; the caller may
    /// re-issue or retry delivery.
    pub async fn issue_code(&self, email: &str) -> DomainResult<IssueCodeResult> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(OtpError::InvalidEmail.into());
        }

        let code = OtpCode::generate_code();
        let code_hash = self.hasher.hash(&code)?;

        let record = OtpCode::new_with_expiration(
            email.clone(),
            code_hash,
            self.config.code_expiration_minutes,
        );
        let record = self.otp_repository.create(record).await?;

        tracing::info!(
            email = %mask_email(&email),
            otp_id = %record.id,
            event = "otp_issued",
            "Issued new verification code"
        );

        let message_id = match self
            .mailer
            .send_code(&email, &code, &self.config.subject_context)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                // The record stays in place; only delivery failed
                tracing::error!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                return Err(OtpError::DeliveryFailure.into());
            }
        };

        Ok(IssueCodeResult {
            otp: record,
            message_id,
        })
    }

    /// Verify a submitted code for an email address.
    ///
    /// Checks run in a fixed order, each short-circuiting:
    ///
    /// 1. input shape (no store access on failure)
    /// 2. newest record lookup
    /// 3. expiry — expired records are deleted even if the submitted
    ///    code is correct
    /// 4. attempt ceiling — exhausted records are deleted even if the
    ///    submitted code is correct
    /// 5. hash comparison — a mismatch increments the persisted counter
    ///    and retains the record; a match marks the record verified,
    ///    flips the user's `email_verified` flag, then deletes the
    ///    record
    ///
    /// The user flag is durably updated before the OTP record is
    /// deleted: a crash between the two writes leaves a verified user
    /// plus an orphaned record, not the reverse.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifiedUser> {
        // Shape validation happens before any store access
        if email.trim().is_empty() {
            return Err(OtpError::InvalidEmail.into());
        }
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::InvalidCodeFormat.into());
        }

        let email = normalize_email(email);

        let record = match self.otp_repository.find_latest_by_email(&email).await? {
            Some(record) => record,
            None => {
                // Deliberately silent on whether the email is registered
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "otp_not_found",
                    "Verification attempted without an active code"
                );
                return Err(OtpError::CodeNotFound.into());
            }
        };

        if record.is_expired() {
            self.otp_repository.delete(record.id).await?;
            tracing::warn!(
                email = %mask_email(&email),
                otp_id = %record.id,
                event = "otp_expired",
                "Verification code expired; record purged"
            );
            return Err(OtpError::CodeExpired.into());
        }

        if record.attempts >= self.config.max_attempts {
            self.otp_repository.delete(record.id).await?;
            tracing::warn!(
                email = %mask_email(&email),
                otp_id = %record.id,
                attempts = record.attempts,
                event = "otp_exhausted",
                "Attempt ceiling reached; record purged"
            );
            return Err(OtpError::MaxAttemptsExceeded.into());
        }

        if !self.hasher.verify(code, &record.code_hash)? {
            let attempts = self.otp_repository.increment_attempts(record.id).await?;
            let remaining = (self.config.max_attempts - attempts).max(0);
            tracing::warn!(
                email = %mask_email(&email),
                otp_id = %record.id,
                remaining_attempts = remaining,
                event = "otp_mismatch",
                "Wrong verification code submitted"
            );
            return Err(OtpError::InvalidCode {
                remaining_attempts: remaining,
            }
            .into());
        }

        self.otp_repository.mark_verified(record.id).await?;

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Verification attempted before registration. The record
                // could never be consumed again (lookups key on email,
                // not verified state), so purge it instead of leaving a
                // verified orphan behind.
                self.otp_repository.delete(record.id).await?;
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "otp_user_missing",
                    "Code verified but no matching user record"
                );
                return Err(OtpError::UserNotFound.into());
            }
        };

        self.user_repository.mark_email_verified(user.id).await?;
        self.otp_repository.delete(record.id).await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %user.id,
            event = "otp_verified",
            "Email verification completed"
        );

        Ok(VerifiedUser {
            id: user.id,
            email: user.email,
            email_verified: true,
        })
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@campus.edu"), "bob@campus.edu");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }
}
