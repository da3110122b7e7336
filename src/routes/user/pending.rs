use std::sync::Arc;

use actix_web::{get, web};
use entity::role::Role;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

/// Users of the caller's group still waiting for approval.
#[get("/pending")]
pub async fn pending_users(db: web::Data<Arc<PortalDb>>, me: CurrentUser) -> ApiResult<Vec<UserView>> {
    policy::require_role(&me.user, &[Role::Leader])?;

    let group_id = me
        .user
        .group_id
        .ok_or_else(|| AppError::forbidden("Leader must belong to a team to manage users"))?;

    let pending = db.list_pending_in_group(group_id, me.user.id).await?;
    Ok(ApiResponse::Ok(pending.into_iter().map(UserView::from).collect()))
}
