use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: Uuid,
    pub group_id: Uuid,
    pub title: String,
    pub file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub uploaded_by: Option<Uuid>,
}

impl From<entity::submission::Model> for SubmissionView {
    fn from(s: entity::submission::Model) -> Self {
        Self {
            id: s.id,
            group_id: s.group_id,
            title: s.title,
            file_url: s.file_url,
            submitted_at: s.submitted_at,
            uploaded_by: s.uploaded_by,
        }
    }
}

/// Row handed to `PortalDb::create_submission`.
pub struct DBSubmissionCreate {
    pub group_id: Uuid,
    pub title: String,
    pub file_url: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub uploaded_by: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RSubmissionCreate {
    pub group_id: Uuid,
    pub title: String,
    pub file_url: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RSubmissionUpdate {
    pub group_id: Option<Uuid>,
    pub title: Option<String>,
    pub file_url: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    pub file: Option<TempFile>,
    #[multipart(rename = "groupId")]
    pub group_id: Text<Uuid>,
    pub title: Text<String>,
}

#[derive(Debug, MultipartForm)]
pub struct ReplaceFileForm {
    pub file: Option<TempFile>,
    pub title: Option<Text<String>>,
}

pub fn clean_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    Ok(title.to_string())
}
