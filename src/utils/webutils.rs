use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::{dev::Payload, dev::ServiceRequest, web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::debug;

use crate::db::portal_db::PortalDb;
use crate::types::error::AppError;

/// The authenticated caller, resolved once per request by [`validate_token`].
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: entity::user::Model,
    pub session_id: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<CurrentUser>().cloned().ok_or(AppError::Unauthorized))
    }
}

pub async fn validate_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let db = match req.app_data::<web::Data<Arc<PortalDb>>>() {
        Some(db) => db.clone(),
        None => return Err((AppError::Internal("database not configured".into()).into(), req)),
    };

    match db.authenticate(credentials.token()).await {
        Ok((session, user)) => {
            req.extensions_mut().insert(CurrentUser { user, session_id: session.id });
            Ok(req)
        }
        Err(err) => {
            debug!("rejected bearer token: {err}");
            Err((err.into(), req))
        }
    }
}
