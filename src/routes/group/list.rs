use std::sync::Arc;

use actix_web::{get, web};

use crate::db::portal_db::PortalDb;
use crate::types::group::GroupView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::CurrentUser;

#[get("")]
pub async fn list_groups(db: web::Data<Arc<PortalDb>>, _me: CurrentUser) -> ApiResult<Vec<GroupView>> {
    Ok(ApiResponse::Ok(db.list_groups().await?))
}
