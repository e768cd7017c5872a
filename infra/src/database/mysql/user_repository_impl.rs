//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cm_core::domain::entities::user::User;
use cm_core::errors::DomainError;
use cm_core::repositories::UserRepository;
use cm_core::services::otp::mask_email;

/// MySQL-backed user storage
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in users.id: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get display_name: {}", e),
                })?,
            email_verified: row
                .try_get("email_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get email_verified: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, display_name, email_verified, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to query users"
                );
                DomainError::Internal {
                    message: format!("Database query failed: {}", e),
                }
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Validation {
                message: "Email address already registered".to_string(),
            });
        }

        let query = r#"
            INSERT INTO users (
                id, email, display_name, email_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(user.email_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(user)
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<(), DomainError> {
        // Idempotent: re-running against an already-verified user is a
        // no-op. rows_affected is not checked because MySQL reports 0
        // for updates that leave the row unchanged.
        let query = "UPDATE users SET email_verified = TRUE, updated_at = ? WHERE id = ?";

        sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to mark email verified: {}", e),
            })?;

        Ok(())
    }
}
