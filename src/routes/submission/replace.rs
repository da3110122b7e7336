use std::sync::Arc;

use actix_multipart::form::MultipartForm;
use actix_web::{post, web};
use uuid::Uuid;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::routes::submission::require_file;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::{clean_title, ReplaceFileForm, SubmissionView};
use crate::utils::storage;
use crate::utils::webutils::CurrentUser;

/// Swaps the stored file of an existing submission.
#[post("/{id}/upload")]
pub async fn replace_file(
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    me: CurrentUser,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<ReplaceFileForm>,
) -> ApiResult<SubmissionView> {
    let submission = db.get_submission(path.into_inner()).await?;
    policy::check_submission_edit(&me.user, &submission)?;

    let file = require_file(form.file)?;
    let title = form.title.map(|t| clean_title(&t)).transpose()?;

    let file_url = storage::persist_upload(&config.upload_dir, file)?;
    let updated = match db.replace_submission_file(submission.id, file_url.clone(), title).await {
        Ok(updated) => updated,
        Err(e) => {
            storage::remove_stored(&config.upload_dir, &file_url).await;
            return Err(e);
        }
    };
    if let Some(old) = submission.file_url.as_deref() {
        storage::remove_stored(&config.upload_dir, old).await;
    }

    Ok(ApiResponse::Ok(updated.into()))
}
