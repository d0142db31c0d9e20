// src/middleware/auth.rs
use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;

use crate::auth::jwt::{validate_token, Claims};
use crate::config::jwt::JwtSettings;
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the request and validate it.
pub fn claims_from_request(req: &ServiceRequest) -> Result<Claims, AppError> {
    let jwt_settings = req
        .app_data::<web::Data<JwtSettings>>()
        .ok_or_else(|| AppError::Internal("JWT settings are not registered".to_string()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    validate_token(token, jwt_settings).map_err(|e| {
        tracing::info!("Rejected bearer token: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// Requires a valid bearer token and stores its `Claims` in the request
/// extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = match claims_from_request(&req) {
            Ok(claims) => claims,
            Err(e) => return Box::pin(async move { Err(e.into()) }),
        };

        req.extensions_mut().insert(claims);

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
