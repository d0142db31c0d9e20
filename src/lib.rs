use actix_web::dev::Server;
use actix_web::error::InternalError;
use actix_web::{http, web, App, HttpServer};
use actix_cors::Cors;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
pub mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::error::AppError;
use crate::middleware::recovery::CatchPanic;
use crate::routes::init_routes;
use crate::services::{AuthService, LeagueService, ReportService};

/// Knobs that differ between production and tests.
#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    pub mode: ServerMode,
    pub password_hash_cost: u32,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            mode: ServerMode::default(),
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

pub fn run<S: LeagueStore>(
    listener: TcpListener,
    store: Arc<S>,
    jwt_settings: Arc<JwtSettings>,
    options: ServerOptions,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let auth_service = web::Data::new(AuthService::new(
        store.clone(),
        jwt_settings.clone(),
        options.password_hash_cost,
    ));
    let report_service = web::Data::new(ReportService::new(store.clone()));
    let league_service = web::Data::new(LeagueService::new(store));
    let jwt_settings = web::Data::from(jwt_settings);
    let mode = options.mode;

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        let json_config = web::JsonConfig::default().error_handler(move |err, _req| {
            let response = AppError::invalid_body(err.to_string()).to_response(mode);
            InternalError::from_response(err, response).into()
        });
        let path_config = web::PathConfig::default().error_handler(move |err, _req| {
            let response = AppError::validation("Invalid id format").to_response(mode);
            InternalError::from_response(err, response).into()
        });

        App::new()
            .wrap(CatchPanic)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config)
            .app_data(path_config)
            .app_data(web::Data::new(mode))
            .app_data(jwt_settings.clone())
            .app_data(auth_service.clone())
            .app_data(report_service.clone())
            .app_data(league_service.clone())
            .configure(init_routes::<S>)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
