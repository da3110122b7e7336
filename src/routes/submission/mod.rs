use actix_multipart::form::tempfile::TempFile;

use crate::types::error::AppError;

pub mod create;
pub mod delete;
pub mod file;
pub mod get;
pub mod list;
pub mod replace;
pub mod update;
pub mod upload;

/// A browser posts an empty part when no file was picked.
pub(crate) fn require_file(file: Option<TempFile>) -> Result<TempFile, AppError> {
    match file {
        Some(file) if file.size > 0 => Ok(file),
        _ => Err(AppError::BadRequest("No file uploaded".into())),
    }
}
