use crate::db::portal_db::PortalDb;
use crate::types::error::AppError;
use crate::utils::token::{self, construct_token, extract_token_parts};
use chrono::{Duration, Utc};
use entity::session::{ActiveModel as SessionActive, Column, Entity as Session, Model as SessionModel};
use entity::user::Model as UserModel;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;
use uuid::Uuid;

impl PortalDb {
    /// Opens a session for `user_id` and returns the access token for it.
    /// Only an argon2 hash of the secret is stored.
    pub async fn create_session(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        let id = token::new_nanoid(21);
        let secret = token::new_secret();
        let token_hash = token::encrypt(&secret).map_err(|e| AppError::Internal(e.to_string()))?;
        let now = Utc::now();

        SessionActive {
            id: Set(id.clone()),
            user_id: Set(user_id),
            token_hash: Set(token_hash),
            expires_at: Set(now + ttl),
            created_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?;

        Ok(construct_token(&id, &secret))
    }

    /// Resolves a bearer token to its session and user. Every failure mode
    /// (malformed, unknown, expired, wrong secret, user gone) is `Unauthorized`.
    pub async fn authenticate(&self, bearer: &str) -> Result<(SessionModel, UserModel), AppError> {
        let (session_id, secret) = extract_token_parts(bearer).ok_or(AppError::Unauthorized)?;

        let session = Session::find_by_id(session_id)
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if session.expires_at <= Utc::now() {
            debug!("session {} expired", session.id);
            return Err(AppError::Unauthorized);
        }
        if !token::verify(&secret, &session.token_hash).unwrap_or(false) {
            return Err(AppError::Unauthorized);
        }

        let user = match self.get_user_by_id(&session.user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(AppError::Unauthorized),
            Err(e) => return Err(e),
        };
        Ok((session, user))
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        Session::delete_by_id(session_id.to_string())
            .exec(&self.database_connection)
            .await?;
        Ok(())
    }

    /// Hard-delete every expired session.
    pub async fn expire_sessions(&self) -> Result<u64, AppError> {
        let res = Session::delete_many()
            .filter(Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}
