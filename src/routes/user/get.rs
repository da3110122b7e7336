use std::sync::Arc;

use actix_web::{get, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

#[get("/{id}")]
pub async fn get_user(db: web::Data<Arc<PortalDb>>, me: CurrentUser, path: web::Path<Uuid>) -> ApiResult<UserView> {
    let user = db.get_user_by_id(&path.into_inner()).await?;
    policy::check_user_view(&me.user, &user)?;

    Ok(ApiResponse::Ok(user.into()))
}
