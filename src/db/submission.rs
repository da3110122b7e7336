use crate::db::portal_db::PortalDb;
use crate::types::{error::AppError, submission::{DBSubmissionCreate, RSubmissionUpdate}};
use crate::utils::token;
use chrono::Utc;
use entity::submission::{ActiveModel as SubmissionActive, Column, Entity as Submission, Model as SubmissionModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl PortalDb {
    pub async fn create_submission(&self, payload: DBSubmissionCreate) -> Result<SubmissionModel, AppError> {
        // surfaces a 404 instead of a foreign key failure
        self.get_group(payload.group_id).await?;
        if let Some(uploader) = payload.uploaded_by {
            self.get_user_by_id(&uploader).await?;
        }

        let submission = SubmissionActive {
            id: Set(token::new_id()),
            group_id: Set(payload.group_id),
            title: Set(payload.title),
            file_url: Set(payload.file_url),
            submitted_at: Set(payload.submitted_at.unwrap_or_else(Utc::now)),
            uploaded_by: Set(payload.uploaded_by),
        };
        Ok(submission.insert(&self.database_connection).await?)
    }

    pub async fn get_submission(&self, id: Uuid) -> Result<SubmissionModel, AppError> {
        Ok(Submission::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Submission not found".into()))?)
    }

    pub async fn list_submissions(&self) -> Result<Vec<SubmissionModel>, AppError> {
        Ok(Submission::find()
            .order_by_desc(Column::SubmittedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_submissions_for_group(&self, group_id: Uuid) -> Result<Vec<SubmissionModel>, AppError> {
        Ok(Submission::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_submissions_for_user(&self, user_id: Uuid) -> Result<Vec<SubmissionModel>, AppError> {
        Ok(Submission::find()
            .filter(Column::UploadedBy.eq(user_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.database_connection)
            .await?)
    }

    /// Applies only the fields present in `patch`.
    pub async fn update_submission(&self, id: Uuid, patch: RSubmissionUpdate) -> Result<SubmissionModel, AppError> {
        let current = self.get_submission(id).await?;
        if let Some(group_id) = patch.group_id {
            self.get_group(group_id).await?;
        }
        if let Some(uploader) = patch.uploaded_by {
            self.get_user_by_id(&uploader).await?;
        }

        let mut am: SubmissionActive = current.clone().into();
        let mut changed = false;
        if let Some(v) = patch.group_id {
            am.group_id = Set(v);
            changed = true;
        }
        if let Some(v) = patch.title {
            am.title = Set(v);
            changed = true;
        }
        if let Some(v) = patch.file_url {
            am.file_url = Set(Some(v));
            changed = true;
        }
        if let Some(v) = patch.uploaded_by {
            am.uploaded_by = Set(Some(v));
            changed = true;
        }
        if let Some(v) = patch.submitted_at {
            am.submitted_at = Set(v);
            changed = true;
        }
        if !changed {
            return Ok(current);
        }
        Ok(am.update(&self.database_connection).await?)
    }

    /// Points the submission at a freshly stored file; the new upload counts as a resubmission.
    pub async fn replace_submission_file(
        &self,
        id: Uuid,
        file_url: String,
        title: Option<String>,
    ) -> Result<SubmissionModel, AppError> {
        let mut am: SubmissionActive = self.get_submission(id).await?.into();
        am.file_url = Set(Some(file_url));
        am.submitted_at = Set(Utc::now());
        if let Some(title) = title {
            am.title = Set(title);
        }
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_submission(&self, id: Uuid) -> Result<SubmissionModel, AppError> {
        let submission = self.get_submission(id).await?;
        let res = Submission::delete_by_id(id).exec(&self.database_connection).await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Submission not found".into()).into());
        }
        Ok(submission)
    }
}
