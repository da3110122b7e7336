use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware::Logger, App, HttpServer};
use group_portal::config::EnvConfig;
use group_portal::db::portal_db::PortalDb;
use group_portal::routes::{configure_app, security_headers};
use group_portal::utils::ratelimit::RateLimits;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let portal_db = Arc::new(
        PortalDb::new(&config.db_url)
            .await
            .map_err(|e| std::io::Error::other(format!("Failed to initialize database: {e}")))?,
    );
    group_portal::bootstrap(&portal_db, &config)
        .await
        .map_err(|e| std::io::Error::other(format!("Bootstrap failed: {e}")))?;
    group_portal::spawn_session_sweeper(Arc::clone(&portal_db));
    let limits = RateLimits::new().map_err(|e| std::io::Error::other(format!("Rate limiter setup failed: {e}")))?;

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(security_headers())
            .wrap(Logger::default())
            .configure(configure_app(Arc::clone(&portal_db), config.clone(), limits.clone()))
    })
    .client_request_timeout(Duration::from_secs(30))
    .bind(addr)?
    .run()
    .await
}
