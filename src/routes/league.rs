use actix_web::web;

use crate::db::LeagueStore;
use crate::handlers::league::match_handler::{get_match, get_match_goals, list_matches};
use crate::handlers::league::team_handler::{get_team, get_team_players, list_teams};

pub fn configure_teams<S: LeagueStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_teams::<S>)))
        .service(web::resource("/{id}").route(web::get().to(get_team::<S>)))
        .service(web::resource("/{id}/players").route(web::get().to(get_team_players::<S>)));
}

pub fn configure_matches<S: LeagueStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_matches::<S>)))
        .service(web::resource("/{id}").route(web::get().to(get_match::<S>)))
        .service(web::resource("/{id}/goals").route(web::get().to(get_match_goals::<S>)));
}
