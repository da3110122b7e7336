use std::sync::Arc;

use actix_web::{post, web};
use entity::role::Role;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::{clean_title, DBSubmissionCreate, RSubmissionCreate, SubmissionView};
use crate::utils::webutils::CurrentUser;

/// Metadata-only create for admins, e.g. to register a file placed by hand.
#[post("")]
pub async fn create_submission(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    data: web::Json<RSubmissionCreate>,
) -> ApiResult<SubmissionView> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let data = data.into_inner();
    let submission = db
        .create_submission(DBSubmissionCreate {
            group_id: data.group_id,
            title: clean_title(&data.title)?,
            file_url: data.file_url,
            submitted_at: data.submitted_at,
            uploaded_by: data.uploaded_by,
        })
        .await?;

    Ok(ApiResponse::Created(submission.into()))
}
