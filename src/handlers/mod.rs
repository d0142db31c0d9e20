use actix_web::HttpResponse;

use crate::config::settings::ServerMode;
use crate::error::AppError;

pub mod admin;
pub mod auth_handler;
pub mod backend_health_handler;
pub mod league;
pub mod report_handler;

/// Render any domain error as the JSON envelope. Internal failures are logged
/// here so individual handlers don't have to.
pub(crate) fn error_response(error: impl Into<AppError>, mode: ServerMode) -> HttpResponse {
    let error = error.into();
    if let AppError::Internal(detail) = &error {
        tracing::error!("Request failed: {}", detail);
    }
    error.to_response(mode)
}
