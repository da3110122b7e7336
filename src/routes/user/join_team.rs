use std::sync::Arc;

use actix_web::{patch, web};
use tracing::info;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RJoinTeam, UserView};
use crate::utils::webutils::CurrentUser;

#[patch("/{id}/join-team")]
pub async fn join_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
    data: web::Json<RJoinTeam>,
) -> ApiResult<UserView> {
    let target = db.get_user_by_id(&path.into_inner()).await?;
    policy::check_team_change(&me.user, &target)?;

    let group_id = data.into_inner().group_id;
    if group_id == target.group_id {
        return Ok(ApiResponse::Ok(target.into()));
    }
    if let Some(group_id) = group_id {
        db.get_group(group_id).await?;
        policy::check_capacity(db.count_members_in_group(group_id).await?)?;
    }

    let moved = db.move_user_to_group(target, group_id).await?;
    match moved.group_id {
        Some(g) => info!("{} moved to group {g}", moved.id),
        None => info!("{} left their group", moved.id),
    }

    Ok(ApiResponse::Ok(moved.into()))
}
