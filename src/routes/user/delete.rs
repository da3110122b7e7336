use std::sync::Arc;

use actix_web::{delete, web};
use tracing::info;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;
use crate::utils::webutils::CurrentUser;

#[delete("/{id}")]
pub async fn delete_user(db: web::Data<Arc<PortalDb>>, me: CurrentUser, path: web::Path<Uuid>) -> ApiResult<UserView> {
    let target = db.get_user_by_id(&path.into_inner()).await?;
    policy::check_user_removal(&me.user, &target)?;

    let removed = db.delete_user(target.id).await?;
    info!("{} deleted user {}", me.user.id, removed.id);

    Ok(ApiResponse::Ok(removed.into()))
}
