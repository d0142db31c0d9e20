use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod league;
pub mod reports;

use crate::db::LeagueStore;
use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes<S: LeagueStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/api/v1")
            // Public auth routes plus the profile route, which guards itself
            .service(web::scope("/auth").configure(auth::configure::<S>))
            // Reports are public
            .service(web::scope("/reports").configure(reports::configure::<S>))
            // Admin routes. Actix runs the last `wrap` first, so the token is
            // validated before the role is checked.
            .service(
                web::scope("/admin")
                    .wrap(AdminMiddleware)
                    .wrap(AuthMiddleware)
                    .configure(admin::configure::<S>),
            )
            // League reads (require authentication)
            .service(
                web::scope("/teams")
                    .wrap(AuthMiddleware)
                    .configure(league::configure_teams::<S>),
            )
            .service(
                web::scope("/matches")
                    .wrap(AuthMiddleware)
                    .configure(league::configure_matches::<S>),
            ),
    );
}
