use std::sync::Arc;

use actix_web::{get, web};
use uuid::Uuid;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult, FileBody};
use crate::utils::storage;
use crate::utils::webutils::CurrentUser;

async fn load_file(db: &PortalDb, config: &EnvConfig, me: &CurrentUser, id: Uuid, inline: bool) -> Result<FileBody, AppError> {
    let submission = db.get_submission(id).await?;
    policy::check_group_view(&me.user, submission.group_id)?;

    let file_url = submission
        .file_url
        .as_deref()
        .ok_or_else(|| AppError::not_found("File not found"))?;
    let bytes = storage::read_stored(&config.upload_dir, file_url).await?;

    Ok(FileBody {
        bytes,
        content_type: if inline {
            storage::content_type_for(file_url)
        } else {
            "application/octet-stream"
        },
        filename: storage::download_name(&submission.title, file_url),
        inline,
    })
}

#[get("/{id}/view")]
pub async fn view(
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    let file = load_file(&db, &config, &me, path.into_inner(), true).await?;
    Ok(ApiResponse::File(file))
}

#[get("/{id}/download")]
pub async fn download(
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    let file = load_file(&db, &config, &me, path.into_inner(), false).await?;
    Ok(ApiResponse::File(file))
}
