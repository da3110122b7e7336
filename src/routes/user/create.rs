use std::sync::Arc;

use actix_web::{post, web};
use entity::role::Role;
use tracing::info;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{check_password, clean_name, normalize_email, DBUserCreate, RUserCreate, UserView};
use crate::utils::token::hash_password;
use crate::utils::webutils::CurrentUser;

#[post("")]
pub async fn create_user(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    data: web::Json<RUserCreate>,
) -> ApiResult<UserView> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let data = data.into_inner();
    let role = data.role.unwrap_or(Role::Member);
    if role == Role::Owner && me.user.role != Role::Owner {
        return Err(AppError::forbidden("Only owner can assign owner role"));
    }
    // leaders are made through the role endpoint, which knows their group
    if role == Role::Leader {
        return Err(AppError::forbidden("Leader must belong to a team"));
    }

    let email = normalize_email(&data.email)?;
    let name = clean_name(&data.name)?;
    let password_hash = match data.password.as_deref() {
        Some(password) => {
            check_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let user = db
        .create_user(DBUserCreate {
            name,
            email,
            password_hash,
            role,
            group_id: None,
            is_approved: policy::is_elevated(role),
        })
        .await?;
    info!("{} created user {} as {}", me.user.id, user.id, user.role);

    Ok(ApiResponse::Created(user.into()))
}
