//! OTP repository trait defining the interface for OTP record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp_code::OtpCode;
use crate::errors::DomainError;

/// Repository contract for OTP record persistence.
///
/// Implementations handle the actual storage operations while keeping
/// the lifecycle rules (expiry, attempt ceiling, consumption) in the
/// service layer.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Find the most recently created OTP record for a normalized email.
    ///
    /// Ordered by creation time descending, first row. Expired records
    /// MUST be returned rather than filtered out: detecting expiry (and
    /// purging the record) is the lifecycle service's decision.
    ///
    /// # Returns
    /// * `Ok(Some(OtpCode))` - Newest record for the email
    /// * `Ok(None)` - No record exists for the email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<OtpCode>, DomainError>;

    /// Persist a new OTP record.
    async fn create(&self, code: OtpCode) -> Result<OtpCode, DomainError>;

    /// Atomically increment the failed-attempt counter of a record.
    ///
    /// Must be a single conditional update (or equivalent critical
    /// section) so that two concurrent wrong-code submissions cannot
    /// both observe the same counter value and under-count attempts.
    ///
    /// # Returns
    /// The counter value after the increment.
    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Mark a record as verified, immediately before consumption.
    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete a record.
    ///
    /// # Returns
    /// * `Ok(true)` - Record was deleted
    /// * `Ok(false)` - Record did not exist
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
