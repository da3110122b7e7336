use std::sync::Arc;

use actix_web::{get, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

#[get("/{id}/members")]
pub async fn group_members(
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<UserView>> {
    let group = db.get_group(path.into_inner()).await?;
    policy::check_group_view(&me.user, group.id)?;

    let members = db.list_users_in_group(group.id).await?;
    Ok(ApiResponse::Ok(members.into_iter().map(UserView::from).collect()))
}
