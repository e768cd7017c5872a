//! MySQL implementation of the OtpRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cm_core::domain::entities::otp_code::OtpCode;
use cm_core::errors::DomainError;
use cm_core::repositories::OtpRepository;
use cm_core::services::otp::mask_email;

/// MySQL-backed OTP record storage
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_otp(row: &sqlx::mysql::MySqlRow) -> Result<OtpCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(OtpCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in otp_codes.id: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            code_hash: row.try_get("code_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code_hash: {}", e),
            })?,
            attempts: row.try_get("attempts").map_err(|e| DomainError::Internal {
                message: format!("Failed to get attempts: {}", e),
            })?,
            verified: row.try_get("verified").map_err(|e| DomainError::Internal {
                message: format!("Failed to get verified: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<OtpCode>, DomainError> {
        // No expires_at filter here: the lifecycle service decides what
        // to do with expired records
        let query = r#"
            SELECT id, email, code_hash, attempts, verified, created_at, expires_at
            FROM otp_codes
            WHERE email = ?
            ORDER BY created_at DESC
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
                    "Failed to query otp_codes"
                );
                DomainError::Internal {
                    message: format!("Database query failed: {}", e),
                }
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_otp(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, code: OtpCode) -> Result<OtpCode, DomainError> {
        let query = r#"
            INSERT INTO otp_codes (
                id, email, code_hash, attempts, verified, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.email)
            .bind(&code.code_hash)
            .bind(code.attempts)
            .bind(code.verified)
            .bind(code.created_at)
            .bind(code.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&code.email),
                    error = %e,
                    "Failed to insert OTP record"
                );
                DomainError::Internal {
                    message: format!("Failed to create OTP record: {}", e),
                }
            })?;

        Ok(code)
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        // Single UPDATE: concurrent wrong submissions serialize on the
        // row instead of racing a read-modify-write. LAST_INSERT_ID()
        // smuggles the post-increment value back in the result packet,
        // so each caller sees its own counter value with no follow-up
        // SELECT that could observe a later increment.
        let update = "UPDATE otp_codes SET attempts = LAST_INSERT_ID(attempts + 1) WHERE id = ?";

        let result = sqlx::query(update)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to increment attempts: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OtpCode".to_string(),
            });
        }

        Ok(result.last_insert_id() as i32)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        let query = "UPDATE otp_codes SET verified = TRUE WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to mark OTP verified: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OtpCode".to_string(),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM otp_codes WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete OTP record: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
