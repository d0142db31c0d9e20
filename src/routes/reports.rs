use actix_web::web;

use crate::db::LeagueStore;
use crate::handlers::report_handler::{get_match_report, get_top_scorers, list_match_reports};

pub fn configure<S: LeagueStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/matches").route(web::get().to(list_match_reports::<S>)))
        .service(web::resource("/matches/{id}").route(web::get().to(get_match_report::<S>)))
        .service(web::resource("/top-scorers").route(web::get().to(get_top_scorers::<S>)));
}
