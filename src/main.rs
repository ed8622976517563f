use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use newsboard::{
    config::{Config, DEFAULT_NEWS_PORT},
    error::json_config,
    news::NewsFetcher,
    routes,
    store::{InMemoryUserStore, UserRepository},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env(DEFAULT_NEWS_PORT)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let fetcher = NewsFetcher::from_config(&config)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
    let users = web::Data::from(users);
    let fetcher = web::Data::new(fetcher);
    let bind_addr = (config.server_host.clone(), config.server_port);

    log::info!("Starting news service at {}", config.server_url());
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(users.clone())
            .app_data(fetcher.clone())
            .app_data(json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::news_config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
