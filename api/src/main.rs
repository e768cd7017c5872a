use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use cm_core::services::{MailerTrait, OtpService, OtpServiceConfig};
use cm_infra::{create_pool, MockMailer, MySqlOtpRepository, MySqlUserRepository, SmtpMailer};

use cm_api::app::create_app;
use cm_api::config::ApiConfig;
use cm_api::routes::auth::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting CampusMate API Server");

    let config = ApiConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let otp_repository = Arc::new(MySqlOtpRepository::new(pool.clone()));
    let user_repository = Arc::new(MySqlUserRepository::new(pool));

    let mailer: Arc<dyn MailerTrait> = if config.use_mock_mailer {
        info!("Using mock mailer; verification codes will print to the console");
        Arc::new(MockMailer::new())
    } else {
        let smtp_config = config
            .smtp
            .clone()
            .ok_or_else(|| anyhow::anyhow!("SMTP configuration missing"))?;
        info!("Using SMTP mailer via relay: {}", smtp_config.host);
        Arc::new(SmtpMailer::new(smtp_config).map_err(|e| anyhow::anyhow!(e))?)
    };

    let otp_service = Arc::new(OtpService::new(
        otp_repository,
        user_repository,
        Arc::new(mailer),
        OtpServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState {
        otp_service,
        expose_error_details: config.expose_error_details,
    });

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
