use std::sync::Arc;

use actix_web::{get, web};
use entity::role::Role;
use uuid::Uuid;

use crate::db::portal_db::PortalDb;
use crate::policy;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;
use crate::utils::webutils::CurrentUser;

#[get("/{id}/submissions")]
pub async fn user_submissions(
    db: web::Data<Arc<PortalDb>>,
    me: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<SubmissionView>> {
    let user_id = path.into_inner();
    if me.user.id != user_id {
        policy::require_role(&me.user, &[Role::Admin])?;
    }
    // 404 for an unknown user rather than an empty list
    db.get_user_by_id(&user_id).await?;

    let submissions = db.list_submissions_for_user(user_id).await?;
    Ok(ApiResponse::Ok(submissions.into_iter().map(SubmissionView::from).collect()))
}
