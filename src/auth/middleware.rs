use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::config::Config;
use crate::error::AppError;

/// A precondition evaluated before a handler runs.
///
/// Returning an error short-circuits the request; the error becomes the
/// response and the handler is never called.
pub trait RequestGuard {
    fn check(&self, req: &ServiceRequest) -> Result<(), AppError>;
}

/// Requires `Authorization: Bearer <token>` signed with the configured secret.
///
/// On success the decoded `Claims` are stored in the request extensions for
/// the `AuthenticatedUser` extractor.
pub struct BearerToken;

impl RequestGuard for BearerToken {
    fn check(&self, req: &ServiceRequest) -> Result<(), AppError> {
        let config = req.app_data::<web::Data<Config>>().ok_or_else(|| {
            AppError::InternalServerError("Config missing from application data".into())
        })?;

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Access token required".into()))?;

        let claims = verify_token(token, &config.jwt_secret)?;
        req.extensions_mut().insert(claims);
        Ok(())
    }
}

/// Runs an ordered list of guards in front of the wrapped service.
#[derive(Clone, Default)]
pub struct AuthMiddleware {
    guards: Vec<Rc<dyn RequestGuard>>,
}

impl AuthMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pipeline used by protected routes: a single bearer-token guard.
    pub fn bearer() -> Self {
        Self::new().guard(BearerToken)
    }

    /// Appends a guard. Guards run in the order they were added.
    pub fn guard(mut self, guard: impl RequestGuard + 'static) -> Self {
        self.guards.push(Rc::new(guard));
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            guards: self.guards.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    guards: Vec<Rc<dyn RequestGuard>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        for guard in &self.guards {
            if let Err(app_err) = guard.check(&req) {
                log::debug!("request to {} rejected: {}", req.path(), app_err);
                let response = req.error_response(app_err).map_into_right_body();
                return Box::pin(async move { Ok(response) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
    }
}
