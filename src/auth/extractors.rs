use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The identity established by the bearer-token guard.
///
/// Only valid on routes wrapped with `AuthMiddleware::bearer()`, which stores
/// the verified `Claims` in the request extensions. Without them this
/// extractor fails with `AppError::Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser {
                email: claims.sub.clone(),
            })),
            None => {
                let err = AppError::Unauthorized("Access token required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
