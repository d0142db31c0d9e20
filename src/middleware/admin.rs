use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::auth::jwt::Claims;
use crate::error::AppError;

/// Role gate. Must run after `AuthMiddleware`, which is what puts the
/// claims into the request extensions.
pub struct AdminMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let claims = req.extensions().get::<Claims>().cloned();
        let Some(claims) = claims else {
            return Box::pin(async move {
                Err(AppError::Unauthorized("User role not found".to_string()).into())
            });
        };

        if !claims.is_admin() {
            tracing::warn!(
                user_id = %claims.user_id(),
                role = %claims.role,
                "Non-admin user attempted admin access"
            );
            return Box::pin(async move {
                Err(AppError::Forbidden("Admin access required".to_string()).into())
            });
        }

        Box::pin(async move { service.call(req).await })
    }
}
