use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::handlers::error_response;
use crate::models::common::{ApiResponse, PaginationQuery};
use crate::services::LeagueService;

pub async fn list_matches<S: LeagueStore>(
    query: web::Query<PaginationQuery>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    let page = query.resolve();

    match league.list_matches(page).await {
        Ok((matches, total)) => HttpResponse::Ok().json(ApiResponse::success_with_meta(
            "Matches retrieved successfully",
            matches,
            page.meta(total),
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

pub async fn get_match<S: LeagueStore>(
    match_id: web::Path<Uuid>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match league.get_match(match_id.into_inner()).await {
        Ok(fixture) => HttpResponse::Ok().json(ApiResponse::success("Match retrieved successfully", fixture)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

pub async fn get_match_goals<S: LeagueStore>(
    match_id: web::Path<Uuid>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match league.match_goals(match_id.into_inner()).await {
        Ok(goals) => HttpResponse::Ok().json(ApiResponse::success("Goals retrieved successfully", goals)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}
