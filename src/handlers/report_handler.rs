use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::handlers::error_response;
use crate::models::common::{ApiResponse, LimitQuery, PaginationQuery};
use crate::services::ReportService;

#[tracing::instrument(name = "Get match report", skip(reports, mode))]
pub async fn get_match_report<S: LeagueStore>(
    match_id: web::Path<Uuid>,
    reports: web::Data<ReportService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match reports.match_report(match_id.into_inner()).await {
        Ok(report) => HttpResponse::Ok().json(ApiResponse::success("Match report retrieved successfully", report)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "List match reports", skip(query, reports, mode))]
pub async fn list_match_reports<S: LeagueStore>(
    query: web::Query<PaginationQuery>,
    reports: web::Data<ReportService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    let page = query.resolve();

    match reports.list_match_reports(page).await {
        Ok((items, total)) => HttpResponse::Ok().json(ApiResponse::success_with_meta(
            "Match reports retrieved successfully",
            items,
            page.meta(total),
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "Get top scorers", skip(query, reports, mode))]
pub async fn get_top_scorers<S: LeagueStore>(
    query: web::Query<LimitQuery>,
    reports: web::Data<ReportService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match reports.top_scorers(query.resolve()).await {
        Ok(scorers) => HttpResponse::Ok().json(ApiResponse::success("Top scorers retrieved successfully", scorers)),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}
