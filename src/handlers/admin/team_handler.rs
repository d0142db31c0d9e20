use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::error::AppError;
use crate::handlers::error_response;
use crate::models::common::ApiResponse;
use crate::models::league::{PlayerRequest, TeamRequest};
use crate::services::LeagueService;

#[tracing::instrument(
    name = "Admin create team",
    skip(body, league, mode, claims),
    fields(admin_id = %claims.sub, team_name = %body.name)
)]
pub async fn create_team<S: LeagueStore>(
    body: web::Json<TeamRequest>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    if let Err(message) = body.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match league.create_team(body.into_inner()).await {
        Ok(team) => HttpResponse::Created().json(ApiResponse::success("Team created successfully", team)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "Admin update team", skip(body, league, mode, claims), fields(admin_id = %claims.sub))]
pub async fn update_team<S: LeagueStore>(
    team_id: web::Path<Uuid>,
    body: web::Json<TeamRequest>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    if let Err(message) = body.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match league.update_team(team_id.into_inner(), body.into_inner()).await {
        Ok(team) => HttpResponse::Ok().json(ApiResponse::success("Team updated successfully", team)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "Admin delete team", skip(league, mode, claims), fields(admin_id = %claims.sub))]
pub async fn delete_team<S: LeagueStore>(
    team_id: web::Path<Uuid>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let team_id = team_id.into_inner();

    match league.delete_team(team_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(
            "Team deleted successfully",
            serde_json::json!({ "id": team_id }),
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "Admin add player", skip(body, league, mode, claims), fields(admin_id = %claims.sub))]
pub async fn add_player<S: LeagueStore>(
    team_id: web::Path<Uuid>,
    body: web::Json<PlayerRequest>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    if let Err(message) = body.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match league.add_player(team_id.into_inner(), body.into_inner()).await {
        Ok(player) => HttpResponse::Created().json(ApiResponse::success("Player added successfully", player)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}
