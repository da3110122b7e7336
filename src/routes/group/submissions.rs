use std::sync::Arc;

use actix_web::{get, web};
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;
use crate::utils::webutils::CurrentUser;

#[get("/{id}/submissions")]
pub async fn group_submissions(
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<SubmissionView>> {
    let group = db.get_group(path.into_inner()).await?;
    policy::check_group_view(&me.user, group.id)?;

    let submissions = db.list_submissions_for_group(group.id).await?;
    Ok(ApiResponse::Ok(submissions.into_iter().map(SubmissionView::from).collect()))
}
