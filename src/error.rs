use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::config::settings::ServerMode;
use crate::models::common::ApiResponse;

/// Boundary error taxonomy. Every domain error converts into one of these and
/// each variant owns exactly one status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, detail: Option<String> },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation { message: message.into(), detail: None }
    }

    pub fn invalid_body(detail: impl Into<String>) -> Self {
        AppError::Validation {
            message: "Invalid request body".to_string(),
            detail: Some(detail.into()),
        }
    }

    /// Render the envelope. Internal details only leave the process in
    /// `debug` mode.
    pub fn to_response(&self, mode: ServerMode) -> HttpResponse {
        let body = match self {
            AppError::Validation { message, detail: Some(detail) } => {
                ApiResponse::<()>::error_with_detail(message.as_str(), detail.as_str())
            }
            AppError::Validation { message, detail: None } => ApiResponse::error(message.as_str()),
            AppError::Unauthorized(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => ApiResponse::error(message.as_str()),
            AppError::Internal(detail) if mode.exposes_internal_errors() => {
                ApiResponse::error_with_detail("Internal server error", detail.as_str())
            }
            AppError::Internal(_) => ApiResponse::error("Internal server error"),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response(ServerMode::Release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn every_variant_has_its_status() {
        assert_eq!(AppError::validation("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn internal_detail_is_hidden_in_release_mode() {
        let error = AppError::Internal("connection refused".into());

        let release = body_json(error.to_response(ServerMode::Release)).await;
        assert_eq!(release, serde_json::json!({"success": false, "message": "Internal server error"}));

        let debug = body_json(error.to_response(ServerMode::Debug)).await;
        assert_eq!(debug["error"], "connection refused");
    }
}
