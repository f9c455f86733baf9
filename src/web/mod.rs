//! Web surface
//!
//! Serves the three quiz pages as server-rendered HTML forms, the photo
//! files and a health endpoint.

pub mod chart;
pub mod handlers;
pub mod render;

use std::path::PathBuf;

use actix_web::{middleware, web, App, HttpServer};

use crate::dataset::Dataset;
use crate::db::Database;
use crate::session::SessionStore;

/// Application state shared by all workers
pub struct AppState {
    pub dataset: Dataset,
    pub db: Database,
    pub sessions: SessionStore,
    pub images_dir: PathBuf,
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/start", web::post().to(handlers::start))
        .route("/finish", web::post().to(handlers::finish))
        .route("/restart", web::post().to(handlers::restart))
        .route("/images/{index}", web::get().to(handlers::image))
        .route("/health", web::get().to(handlers::health_check));
}

/// Serve the quiz until the process is stopped
pub async fn run_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);

    tracing::info!("Age Duel listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
