use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};
use std::io;

use tasktrack::{db, routes, AppState, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let pool = db::connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to connect to database: {}", e)))?;

    let state = AppState::new(pool, &config);
    let origins = config.cors_origins.clone();

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(routes::cors(&origins))
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(|cfg| state.configure(cfg))
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
