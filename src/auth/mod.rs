pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use middleware::{AuthMiddleware, BearerToken, RequestGuard};
pub use password::{hash_password, verify_password};
pub use token::{generate_token, generate_token_at, verify_token, Claims};

/// Payload of `POST /users/signup`.
///
/// Fields are optional for serde so that absence is reported as a validation
/// failure with a readable message. Empty strings count as missing.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        required(message = "Missing required fields"),
        length(min = 1, message = "Missing required fields")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Missing required fields"),
        length(min = 1, message = "Missing required fields")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Missing required fields"),
        length(min = 1, message = "Missing required fields")
    )]
    pub password: Option<String>,
    /// Initial news preferences. Defaults to an empty list.
    pub preferences: Option<Vec<String>>,
}

/// Payload of `POST /users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email and password are required"),
        length(min = 1, message = "Email and password are required")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Email and password are required"),
        length(min = 1, message = "Email and password are required")
    )]
    pub password: Option<String>,
}

/// Returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Generic acknowledgement body, e.g. after signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
