pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod utils;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;
use log::warn;

use crate::db::Database;
use crate::errors::AppError;

/// Shared by every request through `web::Data`.
pub struct AppState {
    pub db: Database,
    pub upload_dir: PathBuf,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(web::FormConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()))
    .service(
        web::resource("/save-employee").route(web::post().to(handlers::employee::save_employee)),
    )
    .service(
        web::resource("/employees").route(web::get().to(handlers::employee::get_employees)),
    )
    .service(
        web::resource("/employees/{id}").route(web::get().to(handlers::employee::get_employee)),
    )
    .service(
        web::resource("/get-documents").route(web::post().to(handlers::document::get_documents)),
    )
    .service(
        web::resource("/download/{filename}").route(web::get().to(handlers::document::download_file)),
    )
    .service(
        web::resource("/uploads/{filename}").route(web::get().to(handlers::document::serve_upload)),
    )
    .service(
        web::resource("/pool-status").route(web::get().to(handlers::pool::pool_status)),
    );
}

/// CORS policy for the configured origin list. Unparseable origins are skipped.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    for origin in allowed_origins {
        match url::Url::parse(origin) {
            Ok(url) if url.has_host() => cors = cors.allowed_origin(origin),
            _ => warn!("Ignoring invalid CORS origin {:?}", origin),
        }
    }
    cors.supports_credentials()
}
