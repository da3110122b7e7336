use chrono::Duration;

use crate::config::EnvConfig;

pub mod login;
pub mod register;
pub mod session;

pub(crate) fn session_ttl(config: &EnvConfig) -> Duration {
    Duration::hours(config.session_ttl_hours)
}
