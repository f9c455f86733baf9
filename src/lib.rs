//! Age Duel - Quiz Backend
//!
//! This library provides the Rust backend for the Age Duel quiz: players
//! guess the ages of people in photos and see how their error compares to
//! three models. It handles:
//! - CSV dataset loading
//! - Per-client quiz sessions
//! - Mean absolute error scoring
//! - SQLite persistence of completed sessions
//! - The HTML web surface

pub mod config;
pub mod dataset;
pub mod db;
pub mod metrics;
pub mod session;
pub mod web;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::Duration;

use config::AppConfig;
use db::Database;
use session::SessionStore;
use web::AppState;

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] dataset::DatasetError),

    #[error(transparent)]
    Flow(#[from] session::flow::FlowError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Surface request failures as plain-text 500s
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Request failed: {}", self);
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

// ============================================================================
// Application Setup
// ============================================================================

/// Open the database and load the dataset; any failure here is fatal
pub fn build_state(config: &AppConfig) -> Result<AppState, AppError> {
    tracing::info!("Database path: {:?}", config.db_path);

    // Create database directory if it doesn't exist
    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::new(config.db_path.clone())?;
    db.initialize()?;
    tracing::info!("Database initialized successfully");

    let dataset = dataset::load(&config.data_file, &config.image_extension)?;
    tracing::info!("Loaded {} photos from {:?}", dataset.len(), config.data_file);

    Ok(AppState {
        sessions: SessionStore::new(dataset.len(), Duration::minutes(config.session_ttl_minutes)),
        dataset,
        db,
        images_dir: config.images_dir.clone(),
    })
}

/// Initialize logging, load everything and serve until shutdown
pub async fn run() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Age Duel");

    let config = AppConfig::from_env()?;
    let state = build_state(&config)?;

    web::run_server(state, &config.host, config.port).await?;
    Ok(())
}
