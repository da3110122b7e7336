use std::sync::Arc;

use group_portal::config::EnvConfig;
use group_portal::db::portal_db::PortalDb;
use tempfile::TempDir;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

/// One isolated database plus upload directory per test.
///
/// Runs against in-memory SQLite unless `PORTAL_TEST_POSTGRES` is set, in
/// which case a throwaway Postgres container is started instead.
pub struct TestContext {
    pub db: Arc<PortalDb>,
    pub config: EnvConfig,
    pub uploads: TempDir,
    _container: Option<ContainerAsync<Postgres>>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");

        let (db_url, container) = if std::env::var("PORTAL_TEST_POSTGRES").is_ok() {
            let container = Postgres::default()
                .start()
                .await
                .expect("Failed to start postgres container");
            let host = container.get_host().await.expect("Failed to get host");
            let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");
            (format!("postgresql://postgres:postgres@{}:{}/postgres", host, port), Some(container))
        } else {
            ("sqlite::memory:".to_string(), None)
        };

        let db = Arc::new(
            PortalDb::new(&db_url)
                .await
                .expect("Failed to initialize PortalDb"),
        );
        let config = get_test_config(&db_url, &uploads);

        TestContext {
            db,
            config,
            uploads,
            _container: container,
        }
    }
}

pub fn get_test_config(db_url: &str, uploads: &TempDir) -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: db_url.to_string(),
        upload_dir: uploads.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        session_ttl_hours: 24,
        seed_groups: false,
        cors_origin: "http://localhost:5173".to_string(),
        owner: None,
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use group_portal::types::auth::{RLogin, RRegister};
    use uuid::Uuid;

    pub const PASSWORD: &str = "password123";

    pub fn register(email: &str, group_id: Option<Uuid>) -> RRegister {
        RRegister {
            email: email.to_string(),
            name: "Test User".to_string(),
            password: PASSWORD.to_string(),
            group_id,
        }
    }

    pub fn login(email: &str, password: &str) -> RLogin {
        RLogin {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}
