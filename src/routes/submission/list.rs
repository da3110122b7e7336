use std::sync::Arc;

use actix_web::{get, web};
use entity::role::Role;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;
use crate::utils::webutils::CurrentUser;

#[get("")]
pub async fn list_submissions(db: web::Data<Arc<PortalDb>>, me: CurrentUser) -> ApiResult<Vec<SubmissionView>> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let submissions = db.list_submissions().await?;
    Ok(ApiResponse::Ok(submissions.into_iter().map(SubmissionView::from).collect()))
}
