//! Email delivery: SMTP transport and a console mailer for development.

pub mod mock_mailer;
pub mod smtp_mailer;

pub use mock_mailer::MockMailer;
pub use smtp_mailer::{SmtpMailer, SmtpMailerConfig};
