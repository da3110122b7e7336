use std::sync::Arc;

use actix_web::{get, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::types::group::GroupView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::CurrentUser;

#[get("/{id}")]
pub async fn get_group(db: web::Data<Arc<PortalDb>>, _me: CurrentUser, path: web::Path<Uuid>) -> ApiResult<GroupView> {
    Ok(ApiResponse::Ok(db.get_group_view(path.into_inner()).await?))
}
