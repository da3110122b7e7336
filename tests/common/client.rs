use std::sync::Arc;

use actix_web::App;
use chrono::Duration;
use entity::role::Role;
use entity::user::Model as UserModel;
use group_portal::{
    config::EnvConfig,
    db::portal_db::PortalDb,
    routes::{configure_app, security_headers},
    types::user::DBUserCreate,
    utils::{ratelimit::RateLimits, token::encrypt},
};
use uuid::Uuid;

use super::test_data::PASSWORD;

pub struct TestClient {
    pub db: Arc<PortalDb>,
    pub config: EnvConfig,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(db: Arc<PortalDb>, config: EnvConfig) -> Self {
        TestClient { db, config }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(security_headers())
            .configure(configure_app(
                Arc::clone(&self.db),
                self.config.clone(),
                RateLimits::new().expect("Failed to build rate limits"),
            ))
    }

    /// A user with a password of [`PASSWORD`] and a live session.
    pub async fn create_test_user(
        &self,
        role: Role,
        group_id: Option<Uuid>,
        is_approved: bool,
    ) -> (UserModel, String) {
        let id = Uuid::new_v4();
        let user = self
            .db
            .create_user(DBUserCreate {
                name: format!("{role} {}", &id.to_string()[..8]),
                email: format!("{role}-{id}@test.com"),
                password_hash: Some(encrypt(PASSWORD).expect("Failed to hash password")),
                role: Role::Member,
                group_id,
                is_approved,
            })
            .await
            .expect("Failed to create user");

        // leaders go through the same path as the role endpoint so the group label follows
        let user = if role == Role::Member {
            user
        } else {
            self.db
                .apply_role_change(user, role, group_id)
                .await
                .expect("Failed to set role")
        };

        let token = self
            .db
            .create_session(user.id, Duration::hours(1))
            .await
            .expect("Failed to create session");
        (user, token)
    }

    pub async fn create_owner(&self) -> (UserModel, String) {
        self.create_test_user(Role::Owner, None, true).await
    }

    pub async fn create_admin(&self) -> (UserModel, String) {
        self.create_test_user(Role::Admin, None, true).await
    }

    pub async fn create_group(&self, name: &str) -> Uuid {
        self.db
            .create_group(name.to_string(), None)
            .await
            .expect("Failed to create group")
            .id
    }

    /// Fills a group with plain members until it holds `count` users.
    pub async fn fill_group(&self, group_id: Uuid, count: u64, approved: bool) {
        let existing = self.db.count_members_in_group(group_id).await.expect("count");
        for _ in existing..count {
            self.create_test_user(Role::Member, Some(group_id), approved).await;
        }
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub const BOUNDARY: &str = "----portal-test-boundary";

/// Hand-built `multipart/form-data` body. Returns the content type header and the bytes.
#[allow(dead_code)]
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes());
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n").as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
