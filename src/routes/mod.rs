pub mod health;
pub mod news;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Routes of the news service.
///
/// Expects `web::Data<Config>`, `web::Data<dyn UserRepository>` and
/// `web::Data<NewsFetcher>` in the application data. Preference and news
/// routes sit behind the bearer-token guard.
pub fn news_config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::scope("/users")
                .service(users::signup)
                .service(users::login)
                .service(
                    web::resource("/preferences")
                        .wrap(AuthMiddleware::bearer())
                        .route(web::get().to(users::get_preferences))
                        .route(web::put().to(users::update_preferences)),
                ),
        )
        .service(
            web::resource("/news")
                .wrap(AuthMiddleware::bearer())
                .route(web::get().to(news::get_news)),
        );
}

/// Routes of the task service. Expects `web::Data<dyn TaskRepository>`.
pub fn tasks_config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index).service(health::health).service(
        web::scope("/tasks")
            .app_data(tasks::path_config())
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
