use std::sync::Arc;

use actix_web::{delete, web};
use tracing::info;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

/// Turns a pending member away. The account is removed, not just detached.
#[delete("/{id}/reject")]
pub async fn reject_user(db: web::Data<Arc<PortalDb>>, me: CurrentUser, path: web::Path<Uuid>) -> ApiResult<UserView> {
    let target = db.get_user_by_id(&path.into_inner()).await?;
    if target.id == me.user.id {
        return Err(AppError::forbidden("You cannot reject yourself"));
    }
    policy::check_group_moderation(&me.user, &target)?;
    if target.is_approved {
        return Err(AppError::forbidden("Only pending members can be rejected"));
    }

    let removed = db.delete_user(target.id).await?;
    info!("{} rejected {} ({})", me.user.id, removed.id, removed.email);

    Ok(ApiResponse::Ok(removed.into()))
}
