use std::sync::Arc;

use actix_web::{post, web};
use tracing::warn;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::routes::auth::session_ttl;
use crate::types::auth::{AuthRes, RLogin};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::normalize_email;
use crate::utils::token;

#[post("/login")]
pub async fn login(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    data: web::Json<RLogin>,
) -> ApiResult<AuthRes> {
    let data = data.into_inner();
    let Ok(email) = normalize_email(&data.email) else {
        return Err(AppError::Unauthorized);
    };

    let Some(user) = db.find_user_by_email(&email).await? else {
        warn!("login for unknown email {email}");
        return Err(AppError::Unauthorized);
    };
    let Some(hash) = user.password_hash.as_deref() else {
        warn!("login for user {} without a password", user.id);
        return Err(AppError::Unauthorized);
    };
    if !token::verify(&data.password, hash).unwrap_or(false) {
        warn!("bad password for user {}", user.id);
        return Err(AppError::Unauthorized);
    }

    let access_token = db.create_session(user.id, session_ttl(&config)).await?;

    Ok(ApiResponse::Ok(AuthRes { user: user.into(), access_token }))
}
