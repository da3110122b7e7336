use std::sync::Arc;

use actix_web::{post, web};
use entity::role::Role;
use tracing::info;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::routes::auth::session_ttl;
use crate::types::auth::{AuthRes, RRegister};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{check_password, clean_name, normalize_email, DBUserCreate};
use crate::utils::token::hash_password;

#[post("/register")]
pub async fn register(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    data: web::Json<RRegister>,
) -> ApiResult<AuthRes> {
    let data = data.into_inner();
    let email = normalize_email(&data.email)?;
    let name = clean_name(&data.name)?;
    check_password(&data.password)?;

    if db.user_exists_by_email(&email).await? {
        return Err(AppError::Conflict("Email already exists".into()));
    }
    if let Some(group_id) = data.group_id {
        db.get_group(group_id).await?;
        policy::check_capacity(db.count_members_in_group(group_id).await?)?;
    }

    let user = db
        .create_user(DBUserCreate {
            name,
            email,
            password_hash: Some(hash_password(&data.password)?),
            role: Role::Member,
            group_id: data.group_id,
            is_approved: false,
        })
        .await?;
    let access_token = db.create_session(user.id, session_ttl(&config)).await?;
    info!("registered user {} ({})", user.id, user.email);

    Ok(ApiResponse::Created(AuthRes { user: user.into(), access_token }))
}
