use chrono::{DateTime, Utc};
use entity::role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

/// Row handed to `PortalDb::create_user`.
pub struct DBUserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub group_id: Option<Uuid>,
    pub is_approved: bool,
}

/// Public shape of a user. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub group_id: Option<Uuid>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<entity::user::Model> for UserView {
    fn from(u: entity::user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            group_id: u.group_id,
            is_approved: u.is_approved,
            created_at: u.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RUserCreate {
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RUserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RUserRole {
    pub role: Role,
    pub group_id: Option<Uuid>,
}

/// `groupId: null` (or a missing field) means "leave the current team".
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RJoinTeam {
    #[serde(default)]
    pub group_id: Option<Uuid>,
}

pub const MIN_PASSWORD_LEN: usize = 6;

/// Lower-cases and trims; rejects anything that is not `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("email must be a valid email address".into()));
    }
    Ok(email)
}

pub fn clean_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    Ok(name.to_string())
}

pub fn check_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
