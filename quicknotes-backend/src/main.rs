use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod error;
mod notes;

use config::Config;
use notes::NoteStore;

pub struct AppState {
    pub store: Arc<NoteStore>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("quicknotes v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().map_err(|e| {
        log::error!("[CONFIG] {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("[NOTES] Using notes directory {}", config.notes_dir.display());
    let store = Arc::new(NoteStore::new(config.notes_dir.clone()).map_err(|e| {
        log::error!(
            "[NOTES] Cannot create notes directory {}: {}",
            config.notes_dir.display(),
            e
        );
        e
    })?);

    let (host, port) = config.bind_addr();
    log::info!("Listening on http://{}:{}", host, port);
    log::info!("API docs at http://{}:{}/swagger/", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::clone(&store),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
            .configure(controllers::docs::config)
    })
    .bind((host, port))?
    .run()
    .await
}
