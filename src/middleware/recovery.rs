use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpRequest, ResponseError,
};
use futures::FutureExt;
use futures_util::future::LocalBoxFuture;

use crate::error::AppError;
use crate::telemetry::panic_message;

/// Turns a panic while serving a request into a 500 for that request only.
/// The worker stays alive and keeps serving.
pub struct CatchPanic;

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CatchPanicService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchPanicService { service }))
    }
}

pub struct CatchPanicService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CatchPanicService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let http_req = req.request().clone();

        let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let response = recovered(http_req, payload.as_ref());
                return Box::pin(async move { Ok(response) });
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result.map(ServiceResponse::map_into_left_body),
                Err(payload) => Ok(recovered(http_req, payload.as_ref())),
            }
        })
    }
}

fn recovered<B>(req: HttpRequest, payload: &(dyn std::any::Any + Send)) -> ServiceResponse<EitherBody<B>> {
    tracing::error!(
        method = %req.method(),
        path = req.path(),
        panic = %panic_message(payload),
        "Recovered from panic while handling request"
    );
    let response = AppError::Internal("request handler panicked".to_string()).error_response();
    ServiceResponse::new(req, response).map_into_right_body()
}
