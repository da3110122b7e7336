use std::sync::Arc;

use actix_web::{get, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;
use crate::utils::webutils::CurrentUser;

#[get("/{id}")]
pub async fn get_submission(
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<SubmissionView> {
    let submission = db.get_submission(path.into_inner()).await?;
    policy::check_group_view(&me.user, submission.group_id)?;

    Ok(ApiResponse::Ok(submission.into()))
}
