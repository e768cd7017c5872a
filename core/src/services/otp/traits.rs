//! Trait for outbound email integration

use async_trait::async_trait;

/// Trait for the notification channel that delivers plaintext codes.
///
/// Delivery may fail independently of the store; failures are reported
/// to the caller but never retried synchronously, and delivery is never
/// on the verification critical path.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Deliver a verification code to an email address.
    ///
    /// `subject_context` describes why the code was sent and feeds the
    /// subject line. Returns a provider message id on success.
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        subject_context: &str,
    ) -> Result<String, String>;
}

#[async_trait]
impl<T: MailerTrait + ?Sized> MailerTrait for std::sync::Arc<T> {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        subject_context: &str,
    ) -> Result<String, String> {
        (**self).send_code(email, code, subject_context).await
    }
}
