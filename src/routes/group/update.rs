use std::sync::Arc;

use actix_web::{patch, web};
use entity::role::Role;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::routes::group::clean_leader_name;
use crate::types::group::{GroupView, RGroupUpdate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::clean_name;
use crate::utils::webutils::CurrentUser;

#[patch("/{id}")]
pub async fn update_group(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
    data: web::Json<RGroupUpdate>,
) -> ApiResult<GroupView> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let data = data.into_inner();
    let name = data.name.as_deref().map(clean_name).transpose()?;
    let group = db
        .update_group(path.into_inner(), name, clean_leader_name(data.leader_name))
        .await?;

    Ok(ApiResponse::Ok(db.get_group_view(group.id).await?))
}
