use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::error::AppError;
use crate::handlers::error_response;
use crate::models::common::ApiResponse;
use crate::models::league::{AddGoalsRequest, CreateMatchRequest, MatchResultRequest};
use crate::services::LeagueService;

#[tracing::instrument(name = "Admin create match", skip(body, league, mode, claims), fields(admin_id = %claims.sub))]
pub async fn create_match<S: LeagueStore>(
    body: web::Json<CreateMatchRequest>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    if let Err(message) = body.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match league.create_match(body.into_inner()).await {
        Ok(fixture) => HttpResponse::Created().json(ApiResponse::success("Match created successfully", fixture)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(
    name = "Admin record match result",
    skip(body, league, mode, claims),
    fields(admin_id = %claims.sub, home_score = body.home_score, away_score = body.away_score)
)]
pub async fn record_match_result<S: LeagueStore>(
    match_id: web::Path<Uuid>,
    body: web::Json<MatchResultRequest>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    if let Err(message) = body.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match league.record_result(match_id.into_inner(), body.into_inner()).await {
        Ok(fixture) => HttpResponse::Ok().json(ApiResponse::success("Match result recorded successfully", fixture)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "Admin add goals", skip(body, league, mode, claims), fields(admin_id = %claims.sub))]
pub async fn add_goals<S: LeagueStore>(
    match_id: web::Path<Uuid>,
    body: web::Json<AddGoalsRequest>,
    league: web::Data<LeagueService<S>>,
    mode: web::Data<ServerMode>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    if let Err(message) = body.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match league.add_goals(match_id.into_inner(), &body.goals).await {
        Ok(goals) => HttpResponse::Created().json(ApiResponse::success("Goals added successfully", goals)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}
