use std::sync::Arc;

use actix_web::{delete, web};
use tracing::info;
use uuid::Uuid;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;
use crate::utils::storage;
use crate::utils::webutils::CurrentUser;

#[delete("/{id}")]
pub async fn delete_submission(
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<SubmissionView> {
    let submission = db.get_submission(path.into_inner()).await?;
    policy::check_submission_edit(&me.user, &submission)?;

    let removed = db.delete_submission(submission.id).await?;
    if let Some(file_url) = removed.file_url.as_deref() {
        storage::remove_stored(&config.upload_dir, file_url).await;
    }
    info!("{} deleted submission {}", me.user.id, removed.id);

    Ok(ApiResponse::Ok(removed.into()))
}
