use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthenticatedUser, LoginRequest,
        MessageResponse, SignupRequest, TokenResponse,
    },
    config::Config,
    error::AppError,
    models::{PreferencesInput, PreferencesResponse, User},
    store::UserRepository,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Stores the account with a bcrypt-hashed password. Does not log the user in.
///
/// ## Responses:
/// - `200 OK`: `{"message": "User registered successfully"}`.
/// - `400 Bad Request`: missing fields, or the email is already registered.
#[post("/signup")]
pub async fn signup(
    config: web::Data<Config>,
    users: web::Data<dyn UserRepository>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;
    let SignupRequest {
        name,
        email,
        password,
        preferences,
    } = signup_data.into_inner();
    let (name, email, password) = match (name, email, password) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => return Err(AppError::ValidationError("Missing required fields".into())),
    };

    // The store repeats this check atomically on insert.
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(&password, config.bcrypt_cost)?;

    users
        .insert(User {
            name,
            email: email.clone(),
            password_hash,
            preferences: preferences.unwrap_or_default(),
        })
        .await?;

    log::info!("registered user {}", email);
    Ok(HttpResponse::Ok().json(MessageResponse::new("User registered successfully")))
}

/// Login user
///
/// Verifies the credentials and returns a bearer token valid for 24 hours.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: email or password missing.
/// - `401 Unauthorized`: unknown email or wrong password.
#[post("/login")]
pub async fn login(
    config: web::Data<Config>,
    users: web::Data<dyn UserRepository>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;
    let (email, password) = match (&login_data.email, &login_data.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(AppError::ValidationError(
                "Email and password are required".into(),
            ))
        }
    };

    let user = users
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = generate_token(&user.email, &config.jwt_secret)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Returns the authenticated user's news preferences.
///
/// ## Responses:
/// - `200 OK`: `{"preferences": [...]}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the token's user no longer exists.
pub async fn get_preferences(
    identity: AuthenticatedUser,
    users: web::Data<dyn UserRepository>,
) -> Result<impl Responder, AppError> {
    let user = users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(PreferencesResponse {
        preferences: user.preferences,
    }))
}

/// Replaces the authenticated user's news preferences.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Preferences updated successfully"}`.
/// - `400 Bad Request`: `preferences` missing or not an array of strings.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the token's user no longer exists.
pub async fn update_preferences(
    identity: AuthenticatedUser,
    users: web::Data<dyn UserRepository>,
    preferences_data: web::Json<PreferencesInput>,
) -> Result<impl Responder, AppError> {
    preferences_data.validate()?;
    let preferences = preferences_data
        .into_inner()
        .preferences
        .ok_or_else(|| AppError::ValidationError("Preferences must be an array".into()))?;

    if !users
        .update_preferences(&identity.email, preferences)
        .await?
    {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Preferences updated successfully")))
}
