use std::sync::Arc;

use actix_web::{patch, web};
use entity::role::Role;
use tracing::info;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserRole, UserView};
use crate::utils::webutils::CurrentUser;

#[patch("/{id}/role")]
pub async fn update_role(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
    data: web::Json<RUserRole>,
) -> ApiResult<UserView> {
    let data = data.into_inner();
    let target = db.get_user_by_id(&path.into_inner()).await?;

    policy::check_role_assignment(&me.user, &target, data.role)?;
    let group_id = policy::resolve_role_group(&target, data.role, data.group_id)?;

    if let Some(requested) = data.group_id {
        db.get_group(requested).await?;
    }
    if let (Role::Leader, Some(group_id)) = (data.role, group_id) {
        let current = db.find_leader_of_group(group_id).await?;
        policy::check_single_leader(target.id, current.as_ref())?;
    }
    if let Some(new_group) = group_id.filter(|g| Some(*g) != target.group_id) {
        policy::check_capacity(db.count_members_in_group(new_group).await?)?;
    }

    let previous = target.role;
    let updated = db.apply_role_change(target, data.role, group_id).await?;
    info!("{} changed role of {} from {} to {}", me.user.id, updated.id, previous, updated.role);

    Ok(ApiResponse::Ok(updated.into()))
}
