pub mod config;
pub mod db;
pub mod policy;
pub mod routes;
pub mod types;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::types::error::AppError;

/// How often expired sessions are swept.
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// First-boot work that has to finish before the server takes traffic.
pub async fn bootstrap(db: &PortalDb, config: &EnvConfig) -> Result<(), AppError> {
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("create {}: {e}", config.upload_dir.display())))?;

    if config.seed_groups {
        db.seed_default_groups().await?;
    }
    if let Some(owner) = &config.owner {
        db.bootstrap_owner(owner).await?;
    }
    Ok(())
}

/// Background task deleting expired sessions for the lifetime of the process.
pub fn spawn_session_sweeper(db: Arc<PortalDb>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            match db.expire_sessions().await {
                Ok(0) => {}
                Ok(n) => info!("Swept {n} expired sessions"),
                Err(e) => error!("Session sweep failed: {e}"),
            }
        }
    })
}
