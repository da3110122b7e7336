use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use tracing::warn;
use uuid::Uuid;

use crate::types::error::AppError;

/// Public prefix of every stored file's `file_url`.
pub const UPLOAD_PREFIX: &str = "/uploads/";

/// Extension of `name` including the dot, if it looks sane. Anything that
/// is not short and alphanumeric is dropped rather than trusted.
pub fn safe_extension(name: &str) -> String {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!(".{ext}")
        }
        _ => String::new(),
    }
}

/// Maps a `file_url` back onto the upload directory. Returns `None` for
/// anything that would escape it.
pub fn resolve(upload_dir: &Path, file_url: &str) -> Option<PathBuf> {
    let name = file_url.rsplit('/').next()?;
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(upload_dir.join(name))
}

/// Moves an uploaded temp file into the upload directory under a fresh
/// random name and returns its `file_url`.
pub fn persist_upload(upload_dir: &Path, file: TempFile) -> Result<String, AppError> {
    let original = file.file_name.clone().unwrap_or_default();
    let stored = format!("{}{}", Uuid::new_v4(), safe_extension(&original));
    let dest = upload_dir.join(&stored);

    file.file
        .persist(&dest)
        .map_err(|e| AppError::Internal(format!("persist upload to {}: {}", dest.display(), e.error)))?;

    Ok(format!("{UPLOAD_PREFIX}{stored}"))
}

pub async fn read_stored(upload_dir: &Path, file_url: &str) -> Result<Vec<u8>, AppError> {
    let path = resolve(upload_dir, file_url).ok_or_else(|| AppError::not_found("Invalid file path"))?;
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::not_found("File not found")),
        Err(e) => Err(AppError::Internal(format!("read {}: {e}", path.display()))),
    }
}

/// Best effort: a missing file is not an error, anything else is logged.
pub async fn remove_stored(upload_dir: &Path, file_url: &str) {
    let Some(path) = resolve(upload_dir, file_url) else {
        return;
    };
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("failed to remove stored file {}: {e}", path.display());
        }
    }
}

/// Content type used when a stored file is viewed inline.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = safe_extension(filename).to_ascii_lowercase();
    match ext.as_str() {
        // documents
        ".pdf" => "application/pdf",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".doc" => "application/msword",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xls" => "application/vnd.ms-excel",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".ppt" => "application/vnd.ms-powerpoint",
        // images
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".webp" => "image/webp",
        // text
        ".txt" => "text/plain",
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".js" => "text/javascript",
        ".json" => "application/json",
        ".xml" => "application/xml",
        // audio
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/wav",
        ".ogg" => "audio/ogg",
        // video
        ".mp4" => "video/mp4",
        ".webm" => "video/webm",
        ".avi" => "video/x-msvideo",
        // archives and everything else download as bytes
        _ => "application/octet-stream",
    }
}

/// Name offered to the browser: the submission title plus the stored extension.
pub fn download_name(title: &str, file_url: &str) -> String {
    let title: String = title.chars().filter(|c| !c.is_control() && *c != '"' && *c != '/' && *c != '\\').collect();
    let title = if title.trim().is_empty() { "submission".to_string() } else { title };
    format!("{}{}", title, safe_extension(file_url))
}
