use std::sync::Arc;

use actix_web::{patch, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{clean_name, normalize_email, RUserUpdate, UserView};
use crate::utils::webutils::CurrentUser;

#[patch("/{id}")]
pub async fn update_user(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
    data: web::Json<RUserUpdate>,
) -> ApiResult<UserView> {
    let target = db.get_user_by_id(&path.into_inner()).await?;
    policy::check_profile_edit(&me.user, &target)?;

    let data = data.into_inner();
    let name = data.name.as_deref().map(clean_name).transpose()?;
    let email = data.email.as_deref().map(normalize_email).transpose()?;

    let updated = db.update_user_profile(target.id, name, email).await?;
    Ok(ApiResponse::Ok(updated.into()))
}
