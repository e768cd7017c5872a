//! OTP lifecycle service for email-based account verification.
//!
//! This module implements the complete verification workflow:
//! - Code generation, hashing, and email delivery on issuance
//! - Verification with expiry, attempt-limiting, and single-use
//!   consumption of the code
//! - Flipping the bound user's `email_verified` flag on success

mod config;
mod hasher;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use hasher::CodeHasher;
pub use service::{mask_email, normalize_email, OtpService};
pub use traits::MailerTrait;
pub use types::{IssueCodeResult, VerifiedUser};
