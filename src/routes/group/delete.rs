use std::sync::Arc;

use actix_web::{delete, web};
use entity::role::Role;
use tracing::info;
use uuid::Uuid;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::group::GroupView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::storage;
use crate::utils::webutils::CurrentUser;

#[delete("/{id}")]
pub async fn delete_group(
    db: web::Data<Arc<PortalDb>>,
    config: web::Data<EnvConfig>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<GroupView> {
    policy::require_role(&me.user, &[Role::Admin])?;

    let (group, submissions) = db.delete_group(path.into_inner()).await?;
    for file_url in submissions.iter().filter_map(|s| s.file_url.as_deref()) {
        storage::remove_stored(&config.upload_dir, file_url).await;
    }
    info!(
        "{} deleted group {} with {} submissions",
        me.user.id,
        group.id,
        submissions.len()
    );

    Ok(ApiResponse::Ok(GroupView::new(group, 0)))
}
