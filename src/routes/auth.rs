// src/routes/auth.rs
use actix_web::web;

use crate::db::LeagueStore;
use crate::handlers::auth_handler::{get_profile, login_user, register_user};
use crate::middleware::auth::AuthMiddleware;

pub fn configure<S: LeagueStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login_user::<S>)))
        .service(web::resource("/register").route(web::post().to(register_user::<S>)))
        .service(
            web::resource("/profile")
                .wrap(AuthMiddleware)
                .route(web::get().to(get_profile::<S>)),
        );
}
