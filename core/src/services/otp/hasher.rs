//! One-way hashing for OTP codes.
//!
//! The plaintext code is only ever held in memory between generation
//! and delivery; storage sees the bcrypt digest. Verification re-checks
//! a candidate against the digest, it never decrypts.

use crate::errors::{DomainError, DomainResult};

/// bcrypt hash/verify wrapper for 6-digit codes
#[derive(Debug, Clone)]
pub struct CodeHasher {
    cost: u32,
}

impl CodeHasher {
    /// Create a hasher with the default bcrypt cost
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Create a hasher with a custom bcrypt cost
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext code
    pub fn hash(&self, code: &str) -> DomainResult<String> {
        bcrypt::hash(code, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash verification code: {}", e),
        })
    }

    /// Check a candidate code against a stored digest
    pub fn verify(&self, candidate: &str, code_hash: &str) -> DomainResult<bool> {
        bcrypt::verify(candidate, code_hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify code hash: {}", e),
        })
    }
}

impl Default for CodeHasher {
    fn default() -> Self {
        Self::new()
    }
}
