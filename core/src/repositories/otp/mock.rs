//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_code::OtpCode;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// In-memory OTP repository for testing.
///
/// Tracks how many storage calls were made so tests can assert that
/// validation failures never touch the store.
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpCode>>>,
    call_count: Arc<AtomicU64>,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total number of storage calls made against this mock
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Number of records currently held
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    fn track_call(&self) {
        self.call_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<OtpCode>, DomainError> {
        self.track_call();
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.email == email)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn create(&self, code: OtpCode) -> Result<OtpCode, DomainError> {
        self.track_call();
        let mut records = self.records.write().await;
        records.insert(code.id, code.clone());
        Ok(code)
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        self.track_call();
        // Single write-lock critical section: concurrent increments serialize
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "OtpCode".to_string(),
        })?;
        record.attempts += 1;
        Ok(record.attempts)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        self.track_call();
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "OtpCode".to_string(),
        })?;
        record.verified = true;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.track_call();
        let mut records = self.records.write().await;
        Ok(records.remove(&id).is_some())
    }
}
