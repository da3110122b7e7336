use std::sync::Arc;

use actix_multipart::form::MultipartForm;
use actix_web::{post, web};
use tracing::{info, warn};

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::routes::submission::require_file;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::{clean_title, DBSubmissionCreate, SubmissionView, UploadForm};
use crate::utils::storage;
use crate::utils::webutils::CurrentUser;

#[post("/upload")]
pub async fn upload(
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    me: CurrentUser,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> ApiResult<SubmissionView> {
    let file = require_file(form.file)?;
    let group_id = form.group_id.into_inner();
    let title = clean_title(&form.title)?;

    db.get_group(group_id).await?;
    policy::check_upload(&me.user, group_id)?;

    let file_url = storage::persist_upload(&config.upload_dir, file)?;
    let created = db
        .create_submission(DBSubmissionCreate {
            group_id,
            title,
            file_url: Some(file_url.clone()),
            submitted_at: None,
            uploaded_by: Some(me.user.id),
        })
        .await;

    match created {
        Ok(submission) => {
            info!("{} uploaded {} to group {group_id}", me.user.id, file_url);
            Ok(ApiResponse::Created(submission.into()))
        }
        Err(e) => {
            warn!("dropping stored upload {file_url} after failed insert");
            storage::remove_stored(&config.upload_dir, &file_url).await;
            Err(e)
        }
    }
}
