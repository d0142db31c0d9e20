use actix_web::web;

use crate::db::LeagueStore;
use crate::handlers::admin::match_handler::{add_goals, create_match, record_match_result};
use crate::handlers::admin::team_handler::{add_player, create_team, delete_team, update_team};

pub fn configure<S: LeagueStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/teams").route(web::post().to(create_team::<S>)))
        .service(
            web::resource("/teams/{id}")
                .route(web::put().to(update_team::<S>))
                .route(web::delete().to(delete_team::<S>)),
        )
        .service(web::resource("/teams/{id}/players").route(web::post().to(add_player::<S>)))
        .service(web::resource("/matches").route(web::post().to(create_match::<S>)))
        .service(web::resource("/matches/{id}/result").route(web::post().to(record_match_result::<S>)))
        .service(web::resource("/matches/{id}/goals").route(web::post().to(add_goals::<S>)));
}
