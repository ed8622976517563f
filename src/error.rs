//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` shared by both services.
//! Every handler returns `Result<_, AppError>`, and `AppError` implements
//! `actix_web::error::ResponseError` so failures turn into HTTP responses with
//! a JSON `{"error": ...}` body.
//!
//! `From` implementations exist for `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, `bcrypt::BcryptError` and lock poisoning,
//! allowing the `?` operator to be used throughout.

use actix_web::{error::ResponseError, http::StatusCode, web, HttpResponse};
use serde_json::json;
use std::fmt;
use std::sync::PoisonError;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// Missing or invalid credentials or token (HTTP 401).
    Unauthorized(String),
    /// A malformed request body (HTTP 400).
    BadRequest(String),
    /// Registration with an email that is already taken (HTTP 400).
    Conflict(String),
    /// The requested resource does not exist (HTTP 404).
    /// An empty message produces a response without a body.
    NotFound(String),
    /// An unexpected server-side failure (HTTP 500).
    /// The message is logged but never sent to the client.
    InternalServerError(String),
    /// Input failed presence or type checks (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::Conflict(_) | AppError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) if msg.is_empty() => HttpResponse::NotFound().finish(),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => {
                HttpResponse::build(self.status_code()).json(json!({
                    "error": msg
                }))
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Field-level messages set on the DTOs are joined so the client sees the
/// message rather than the validator's internal code.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect();
        messages.sort();
        messages.dedup();
        AppError::ValidationError(messages.join(", "))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid or expired token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(_: PoisonError<T>) -> AppError {
        AppError::InternalServerError("store lock poisoned".into())
    }
}

/// JSON extractor configuration shared by both services.
///
/// Deserialization failures (malformed JSON, a non-boolean `completed`, a
/// `preferences` value that is not an array of strings) become
/// `AppError::BadRequest` so they carry the same JSON error body as every
/// other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
