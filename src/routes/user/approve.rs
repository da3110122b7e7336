use std::sync::Arc;

use actix_web::{patch, web};
use tracing::info;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

#[patch("/{id}/approve")]
pub async fn approve_user(db: web::Data<Arc<PortalDb>>, me: CurrentUser, path: web::Path<Uuid>) -> ApiResult<UserView> {
    let target = db.get_user_by_id(&path.into_inner()).await?;
    if target.id == me.user.id {
        return Err(AppError::forbidden("You cannot approve yourself"));
    }
    policy::check_group_moderation(&me.user, &target)?;

    if target.is_approved {
        return Ok(ApiResponse::Ok(target.into()));
    }
    if let Some(group_id) = target.group_id {
        policy::check_capacity(db.count_approved_in_group(group_id).await?)?;
    }

    let approved = db.approve_user(target.id).await?;
    info!("{} approved {}", me.user.id, approved.id);

    Ok(ApiResponse::Ok(approved.into()))
}
