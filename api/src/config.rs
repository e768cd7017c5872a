//! Server configuration loaded from environment variables.

use std::env;

use anyhow::{anyhow, Result};

use cm_infra::SmtpMailerConfig;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// MySQL connection URL
    pub database_url: String,
    /// Connection pool ceiling
    pub max_connections: u32,
    /// Use the console mailer instead of SMTP
    pub use_mock_mailer: bool,
    /// SMTP settings, required unless the mock mailer is in use
    pub smtp: Option<SmtpMailerConfig>,
    /// Include internal error details in responses (development only)
    pub expose_error_details: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is always required. The SMTP variables are only
    /// required when `USE_MOCK_MAILER` is not enabled.
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow!("SERVER_PORT must be a valid port number"))?;

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL not set"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let use_mock_mailer = env::var("USE_MOCK_MAILER")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let smtp = if use_mock_mailer {
            None
        } else {
            Some(SmtpMailerConfig {
                host: env::var("SMTP_HOST").map_err(|_| anyhow!("SMTP_HOST not set"))?,
                username: env::var("SMTP_USERNAME")
                    .map_err(|_| anyhow!("SMTP_USERNAME not set"))?,
                password: env::var("SMTP_PASSWORD")
                    .map_err(|_| anyhow!("SMTP_PASSWORD not set"))?,
                from_address: env::var("SMTP_FROM_ADDRESS")
                    .map_err(|_| anyhow!("SMTP_FROM_ADDRESS not set"))?,
            })
        };

        let expose_error_details = env::var("EXPOSE_ERROR_DETAILS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            use_mock_mailer,
            smtp,
            expose_error_details,
        })
    }

    /// Bind address in `host:port` form
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
