use actix_web::HttpServer;
use actix_web::cookie::Key;
use anyhow::Context;
use tracing::{info, warn};

use blog_web::infrastructure::config::AppConfig;
use blog_web::infrastructure::database::{create_pool, run_migrations};
use blog_web::infrastructure::logging::init_logging;
use blog_web::presentation::app::{AppState, HttpSettings, build_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to run migrations")?;
            AppState::postgres(pool)
        }
        None => {
            warn!("DATABASE_URL is not set, using the in-memory store");
            AppState::in_memory()
        }
    };

    let session_key = match &config.session_key {
        Some(key) => Key::try_from(key.as_bytes()).context("invalid SESSION_KEY")?,
        None => {
            warn!("SESSION_KEY is not set, sessions will not survive a restart");
            Key::generate()
        }
    };
    let settings = HttpSettings {
        session_key,
        cookie_secure: config.cookie_secure,
        cors_origins: config.cors_origins.clone(),
    };

    info!(host = %config.host, port = config.port, "HTTP server starting");

    HttpServer::new(move || build_app(state.clone(), settings.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
