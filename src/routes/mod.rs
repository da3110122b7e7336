use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::Governor;
use actix_multipart::form::{tempfile::TempFileConfig, MultipartFormConfig};
use actix_web::{http::header, middleware::DefaultHeaders, web};
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::config::EnvConfig;
use crate::db::portal_db::PortalDb;
use crate::types::error::AppError;
use crate::utils::ratelimit::RateLimits;
use crate::utils::webutils::validate_token;

pub mod auth;
pub mod group;
pub mod health;
pub mod submission;
pub mod user;

/// Room for the multipart boundaries and the text fields next to the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state, extractor limits and routes. Used by `main` and by the tests.
///
/// `limits` must be built once per process so every worker draws from the same buckets.
pub fn configure_app(
    db: Arc<PortalDb>,
    config: EnvConfig,
    limits: RateLimits,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let multipart = MultipartFormConfig::default()
            .total_limit(config.max_upload_bytes + MULTIPART_OVERHEAD)
            .memory_limit(MULTIPART_OVERHEAD)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
        let json = web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
        let path = web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

        let cors = cors(&config);

        cfg.app_data(web::Data::new(db))
            .app_data(TempFileConfig::default().directory(&config.upload_dir))
            .app_data(web::Data::new(config))
            .app_data(multipart)
            .app_data(json)
            .app_data(path);

        configure_routes(cfg, cors, &limits);
    }
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
}

/// Single allowed origin, credentials on, bearer tokens and JSON bodies only.
pub fn cors(config: &EnvConfig) -> Cors {
    Cors::default()
        .allowed_origin(&config.cors_origin)
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, cors: Cors, limits: &RateLimits) {
    let user_auth = HttpAuthentication::bearer(validate_token);

    cfg.service(
        web::scope("/api")
            // health stays outside the request quota
            .service(web::scope("/health").service(health::health))
            .service(
                web::scope("")
                    .service(
                        web::scope("/auth")
                            .service(
                                web::scope("/session")
                                    .service(auth::session::current)
                                    .service(auth::session::logout)
                                    .wrap(user_auth.clone()),
                            )
                            // after "/session", the empty scope swallows every path
                            .service(
                                web::scope("")
                                    .service(auth::register::register)
                                    .service(auth::login::login)
                                    .wrap(Governor::new(&limits.auth)),
                            ),
                    )
                    .service(
                        web::scope("/users")
                            .service(user::list::list_users)
                            .service(user::create::create_user)
                            // must precede "/{id}"
                            .service(user::pending::pending_users)
                            .service(user::get::get_user)
                            .service(user::submissions::user_submissions)
                            .service(user::update::update_user)
                            .service(user::role::update_role)
                            .service(user::approve::approve_user)
                            .service(user::reject::reject_user)
                            .service(user::join_team::join_team)
                            .service(user::delete::delete_user)
                            .wrap(user_auth.clone()),
                    )
                    .service(
                        web::scope("/groups")
                            .service(group::list::list_groups)
                            .service(group::create::create_group)
                            .service(group::get::get_group)
                            .service(group::members::group_members)
                            .service(group::submissions::group_submissions)
                            .service(group::update::update_group)
                            .service(group::delete::delete_group)
                            .wrap(user_auth.clone()),
                    )
                    .service(
                        web::scope("/submissions")
                            .service(submission::list::list_submissions)
                            .service(submission::create::create_submission)
                            .service(submission::upload::upload)
                            .service(submission::replace::replace_file)
                            .service(submission::file::view)
                            .service(submission::file::download)
                            .service(submission::get::get_submission)
                            .service(submission::update::update_submission)
                            .service(submission::delete::delete_submission)
                            .wrap(user_auth),
                    )
                    .wrap(Governor::new(&limits.api)),
            )
            .wrap(cors),
    );
}
