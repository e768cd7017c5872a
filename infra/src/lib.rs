//! # CampusMate Infrastructure
//!
//! Concrete implementations of the `cm_core` persistence and delivery
//! seams: MySQL repositories over SQLx and an SMTP mailer over lettre,
//! plus a console mailer for development.

pub mod database;
pub mod email;

pub use database::connection::create_pool;
pub use database::mysql::{MySqlOtpRepository, MySqlUserRepository};
pub use email::{MockMailer, SmtpMailer, SmtpMailerConfig};
