use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use newsboard::{
    config::{Config, DEFAULT_TASKS_PORT},
    error::json_config,
    models::TaskSeed,
    routes,
    store::{InMemoryTaskStore, TaskRepository},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env(DEFAULT_TASKS_PORT)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let seed = match &config.tasks_seed_file {
        Some(path) => {
            let seed = TaskSeed::from_file(path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            log::info!("Loaded {} tasks from {}", seed.tasks.len(), path.display());
            seed
        }
        None => TaskSeed::default(),
    };

    let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskStore::with_tasks(seed.tasks));
    let tasks = web::Data::from(tasks);

    log::info!("Server running at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(tasks.clone())
            .app_data(json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::tasks_config)
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
