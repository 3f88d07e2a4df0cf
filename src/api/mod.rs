pub mod applications;
pub mod auth;
pub mod companies;
pub mod consultants;
pub mod health;
pub mod swagger;
pub mod uploads;

use actix_web::web;
use std::path::Path;

use crate::middleware::AuthMiddleware;
use crate::services::upload_service::PUBLIC_PREFIX;
use crate::utils::AppError;

const JSON_LIMIT: usize = 256 * 1024;

/// Malformed or oversized JSON bodies get the same 400 envelope as
/// validation errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            AppError::bad_request(format!("Invalid JSON body: {}", err)).into()
        })
}

/// Registers every route. Shared state (`Data<dyn Store>`,
/// `Data<Authenticator>`, `Data<UploadConfig>`) is added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig, upload_dir: &Path) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/ping", web::get().to(health::ping))
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup))
                        .route("/login", web::post().to(auth::login))
                        .service(
                            web::resource("/me")
                                .wrap(AuthMiddleware)
                                .route(web::get().to(auth::me)),
                        ),
                )
                .service(
                    web::resource("/dashboard")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(auth::dashboard)),
                )
                .service(
                    web::scope("/companies")
                        .route("", web::get().to(companies::list_companies))
                        .route("", web::post().to(companies::create_company)),
                )
                .service(
                    web::scope("/consultants")
                        .route("", web::get().to(consultants::list_consultants))
                        .route("", web::post().to(consultants::create_consultant))
                        .route("/by-email", web::get().to(consultants::get_consultant_by_email))
                        // Must stay after /by-email
                        .route("/{id}", web::get().to(consultants::get_consultant)),
                )
                .service(
                    web::scope("/consultant-applications")
                        .route("", web::get().to(applications::list_applications))
                        .route("", web::post().to(applications::create_application))
                        .route("/{id}", web::get().to(applications::get_application)),
                )
                .route("/uploads", web::post().to(uploads::upload_image)),
        )
        .service(actix_files::Files::new(PUBLIC_PREFIX, upload_dir));
}
