//! Console mailer for development and testing.
//!
//! Prints verification codes to the console instead of sending mail,
//! so the full issue/verify flow can be exercised without an SMTP
//! relay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use cm_core::services::otp::{mask_email, MailerTrait};

/// Mock mailer that logs instead of sending
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailer {
    /// Create a new mock mailer with console output
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        subject_context: &str,
    ) -> Result<String, String> {
        let masked = mask_email(email);

        if self.simulate_failure {
            warn!(
                target: "mailer",
                provider = "mock",
                email = %masked,
                "Mock mailer simulating delivery failure"
            );
            return Err("Simulated email delivery failure".to_string());
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To:      {}", email);
            println!("Subject: {}", subject_context);
            println!("Code:    {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mailer",
            provider = "mock",
            email = %masked,
            message_id = %message_id,
            "Verification email sent (mock)"
        );

        Ok(message_id)
    }
}
