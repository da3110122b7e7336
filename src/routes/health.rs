use std::sync::Arc;

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::portal_db::PortalDb;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    pub backend: String,
    pub timestamp: DateTime<Utc>,
}

#[get("")]
async fn health(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PortalDb>>,
) -> ApiResult<Response> {
    let backend = db.ping().await?;

    Ok(ApiResponse::Ok(Response { ok: true, backend, timestamp: Utc::now() }))
}
