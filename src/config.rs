use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub session_ttl_hours: i64,
    pub seed_groups: bool,
    /// The one browser origin allowed to call the API with credentials.
    pub cors_origin: String,
    pub owner: Option<OwnerSeed>,
}

/// Credentials for the owner account created on first boot.
#[derive(Clone, Debug)]
pub struct OwnerSeed {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_flag_or(key: &str, default: bool) -> bool {
        match env::var(key) {
            Ok(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!("Invalid value for {key}, using default");
                default
            }),
            Err(_) => default,
        }
    }

    fn get_env_or<T: FromStr>(key: &str, default: T) -> T {
        match env::var(key) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Invalid value for {key}, using default");
                default
            }),
            Err(_) => default,
        }
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("DATABASE_URL");

        let owner = match (env::var("OWNER_EMAIL"), env::var("OWNER_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(OwnerSeed {
                email,
                name: Self::get_env_or("OWNER_NAME", "Owner".to_string()),
                password,
            }),
            _ => {
                info!("OWNER_EMAIL/OWNER_PASSWORD not set, skipping owner bootstrap");
                None
            }
        };

        EnvConfig {
            port: Self::get_env_or("PORT", 3000),
            db_url,
            upload_dir: Self::get_env_or("UPLOAD_DIR", PathBuf::from("uploads")),
            max_upload_bytes: Self::get_env_or("MAX_UPLOAD_BYTES", 50 * 1024 * 1024),
            session_ttl_hours: Self::get_env_or("SESSION_TTL_HOURS", 24),
            seed_groups: Self::get_flag_or("SEED_GROUPS", true),
            cors_origin: Self::get_env_or("CORS_ORIGIN", "https://rupp.codes".to_string()),
            owner,
        }
    }
}

/// Switch-style env values: `1`/`0`, `yes`/`no`, `on`/`off` and `true`/`false`, any case.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "on" | "true" => Some(true),
        "0" | "no" | "off" | "false" => Some(false),
        _ => None,
    }
}
