use std::sync::Arc;

use actix_web::{get, web};
use entity::role::Role;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

#[get("")]
pub async fn list_users(db: web::Data<Arc<PortalDb>>, me: CurrentUser) -> ApiResult<Vec<UserView>> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let users = db.list_users().await?;
    Ok(ApiResponse::Ok(users.into_iter().map(UserView::from).collect()))
}
