use chrono::Utc;
use entity::role::Role;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tracing::info;

use crate::config::OwnerSeed;
use crate::types::{error::AppError, user::{normalize_email, DBUserCreate}};
use crate::utils::token::hash_password;

/// Groups created on first boot when the table is empty.
pub const DEFAULT_GROUPS: [(&str, &str); 6] = [
    ("Web Server Team", "John Doe"),
    ("Database Server Team", "Jane Smith"),
    ("Mail Server Team", "Mike Johnson"),
    ("Red Team", "Sarah Williams"),
    ("Blue Team", "David Brown"),
    ("Purple Team", "Emma Davis"),
];

#[derive(Clone)]
pub struct PortalDb {
    pub(crate) database_connection: DatabaseConnection,
}

impl PortalDb {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let mut opts = ConnectOptions::new(uri.to_string());
        if uri.starts_with("sqlite::memory:") {
            // every pooled connection would otherwise get its own empty database
            opts.max_connections(1).min_connections(1);
        }
        opts.sqlx_logging(false);

        info!("Connecting to database...");
        let database_connection = Database::connect(opts).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");
        Ok(Self { database_connection })
    }

    /// Round-trip used by the health endpoint.
    pub async fn ping(&self) -> Result<String, AppError> {
        let backend = self.database_connection.get_database_backend();
        self.database_connection
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(format!("{backend:?}").to_lowercase())
    }

    pub async fn seed_default_groups(&self) -> Result<u64, AppError> {
        if self.count_groups().await? > 0 {
            info!("Groups already exist, skipping seed");
            return Ok(0);
        }
        for (name, leader) in DEFAULT_GROUPS {
            self.create_group(name.to_string(), Some(leader.to_string())).await?;
        }
        info!("Seeded {} default groups", DEFAULT_GROUPS.len());
        Ok(DEFAULT_GROUPS.len() as u64)
    }

    /// Creates the owner account once; later boots leave it alone.
    pub async fn bootstrap_owner(&self, seed: &OwnerSeed) -> Result<bool, AppError> {
        let email = normalize_email(&seed.email)?;
        if self.user_exists_by_email(&email).await? {
            info!("Owner account already exists");
            return Ok(false);
        }
        let password_hash = hash_password(&seed.password)?;
        self.create_user(DBUserCreate {
            name: seed.name.clone(),
            email: email.clone(),
            password_hash: Some(password_hash),
            role: Role::Owner,
            group_id: None,
            is_approved: true,
        })
        .await?;
        info!("Created owner account ({email}) at {}", Utc::now());
        Ok(true)
    }
}
