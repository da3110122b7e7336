use std::sync::Arc;

use actix_web::{patch, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::{clean_title, RSubmissionUpdate, SubmissionView};
use crate::utils::webutils::CurrentUser;

#[patch("/{id}")]
pub async fn update_submission(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
    data: web::Json<RSubmissionUpdate>,
) -> ApiResult<SubmissionView> {
    let submission = db.get_submission(path.into_inner()).await?;
    policy::check_submission_edit(&me.user, &submission)?;

    let mut patch = data.into_inner();
    let elevated = policy::is_elevated(me.user.role);
    if patch.group_id.is_some_and(|g| g != submission.group_id) && !elevated {
        return Err(AppError::forbidden("Only admins can move submissions between groups"));
    }
    if (patch.file_url.is_some() || patch.uploaded_by.is_some()) && !elevated {
        return Err(AppError::forbidden("Only admins can change the file or uploader"));
    }
    patch.title = patch.title.as_deref().map(clean_title).transpose()?;

    let updated = db.update_submission(submission.id, patch).await?;
    Ok(ApiResponse::Ok(updated.into()))
}
