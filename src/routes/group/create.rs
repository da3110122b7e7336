use std::sync::Arc;

use actix_web::{post, web};
use entity::role::Role;
use tracing::info;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::routes::group::clean_leader_name;
use crate::types::group::{GroupView, RGroupCreate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::clean_name;
use crate::utils::webutils::CurrentUser;

#[post("")]
pub async fn create_group(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    data: web::Json<RGroupCreate>,
) -> ApiResult<GroupView> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let data = data.into_inner();
    let name = clean_name(&data.name)?;
    let group = db.create_group(name, clean_leader_name(data.leader_name)).await?;
    info!("{} created group {} ({})", me.user.id, group.id, group.name);

    Ok(ApiResponse::Created(GroupView::new(group, 0)))
}
