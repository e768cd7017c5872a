//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    CodeHasher, IssueCodeResult, MailerTrait, OtpService, OtpServiceConfig, VerifiedUser,
};
