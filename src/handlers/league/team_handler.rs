use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::handlers::error_response;
use crate::models::common::{ApiResponse, PaginationQuery};
use crate::services::LeagueService;

pub async fn list_teams<S: LeagueStore>(
    query: web::Query<PaginationQuery>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    let page = query.resolve();

    match league.list_teams(page).await {
        Ok((teams, total)) => HttpResponse::Ok().json(ApiResponse::success_with_meta(
            "Teams retrieved successfully",
            teams,
            page.meta(total),
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

pub async fn get_team<S: LeagueStore>(
    team_id: web::Path<Uuid>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match league.get_team(team_id.into_inner()).await {
        Ok(team) => HttpResponse::Ok().json(ApiResponse::success("Team retrieved successfully", team)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

pub async fn get_team_players<S: LeagueStore>(
    team_id: web::Path<Uuid>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match league.team_players(team_id.into_inner()).await {
        Ok(players) => HttpResponse::Ok().json(ApiResponse::success("Players retrieved successfully", players)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}
