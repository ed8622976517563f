use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered account. Email is the unique key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub preferences: Vec<String>,
}

/// Body of `PUT /users/preferences`.
///
/// A `preferences` value that is not an array of strings is rejected by the
/// JSON extractor before validation runs.
#[derive(Debug, Deserialize, Validate)]
pub struct PreferencesInput {
    #[validate(required(message = "Preferences must be an array"))]
    pub preferences: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub preferences: Vec<String>,
}
