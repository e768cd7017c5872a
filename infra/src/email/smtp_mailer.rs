//! SMTP mailer backed by lettre.
//!
//! Sends verification codes as plain-text messages over an
//! authenticated TLS relay connection.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use cm_core::services::otp::{mask_email, MailerTrait};

/// SMTP mailer configuration
#[derive(Debug, Clone)]
pub struct SmtpMailerConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP username
    pub username: String,
    /// SMTP password
    pub password: String,
    /// Sender address placed in the From header
    pub from_address: String,
}

/// Production mailer over an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build a mailer from configuration.
    ///
    /// Fails if the relay host cannot be resolved into a transport.
    pub fn new(config: SmtpMailerConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| format!("Failed to configure SMTP relay '{}': {}", config.host, e))?
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address,
        })
    }

    fn build_body(code: &str, subject_context: &str) -> String {
        format!(
            "Your {} code is: {}\n\n\
             This code expires in 5 minutes. If you did not request it, \
             you can safely ignore this message.\n",
            subject_context, code
        )
    }
}

#[async_trait]
impl MailerTrait for SmtpMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        subject_context: &str,
    ) -> Result<String, String> {
        let from = self
            .from_address
            .parse()
            .map_err(|e| format!("Invalid from address: {}", e))?;
        let to = email
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject_context)
            .header(ContentType::TEXT_PLAIN)
            .body(Self::build_body(code, subject_context))
            .map_err(|e| format!("Failed to build email: {}", e))?;

        match self.transport.send(message).await {
            Ok(response) => {
                let message_id = response
                    .message()
                    .collect::<Vec<&str>>()
                    .join(" ");
                info!(
                    target: "mailer",
                    provider = "smtp",
                    email = %mask_email(email),
                    "Verification email sent"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "mailer",
                    provider = "smtp",
                    email = %mask_email(email),
                    error = %e,
                    "Failed to send verification email"
                );
                Err(format!("SMTP delivery failed: {}", e))
            }
        }
    }
}
