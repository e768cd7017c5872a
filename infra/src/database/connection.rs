//! Database connection pool management

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use cm_core::errors::DomainError;

/// Create a MySQL connection pool.
///
/// The pool tests connections before handing them out and recycles
/// idle connections after ten minutes.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<MySqlPool, DomainError> {
    tracing::info!(
        max_connections = max_connections,
        "Creating database connection pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create database pool");
            DomainError::Internal {
                message: format!("Failed to connect to database: {}", e),
            }
        })?;

    tracing::info!("Database connection pool created");
    Ok(pool)
}
