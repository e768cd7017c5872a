//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository contract for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized email address.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user.
    ///
    /// Fails with a validation error if the email is already registered.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Set `email_verified` to true for a user.
    ///
    /// Idempotent: marking an already-verified user succeeds without
    /// change. The flag never transitions back to false through this
    /// interface.
    async fn mark_email_verified(&self, id: Uuid) -> Result<(), DomainError>;
}
