use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::NewsResponse,
    news::NewsFetcher,
    store::UserRepository,
};
use actix_web::{web, HttpResponse, Responder};

/// News for the authenticated user's preferences.
///
/// Always answers with a list once the user is resolved: provider failures
/// are replaced by synthetic articles inside `NewsFetcher`.
///
/// ## Responses:
/// - `200 OK`: `{"news": [...]}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the token's user no longer exists.
pub async fn get_news(
    identity: AuthenticatedUser,
    users: web::Data<dyn UserRepository>,
    fetcher: web::Data<NewsFetcher>,
) -> Result<impl Responder, AppError> {
    let user = users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let feed = fetcher.fetch(&user.preferences).await;
    log::debug!(
        "serving {} articles to {} ({:?})",
        feed.articles.len(),
        user.email,
        feed.origin
    );

    Ok(HttpResponse::Ok().json(NewsResponse {
        news: feed.articles,
    }))
}
