use std::sync::Arc;

use actix_web::{delete, get, web};

use crate::db::portal_db::PortalDb;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

#[get("")]
pub async fn current(me: CurrentUser) -> ApiResult<UserView> {
    Ok(ApiResponse::Ok(me.user.into()))
}

#[delete("")]
pub async fn logout(db: web::Data<Arc<PortalDb>>, me: CurrentUser) -> ApiResult<()> {
    db.delete_session(&me.session_id).await?;
    Ok(ApiResponse::NoContent)
}
