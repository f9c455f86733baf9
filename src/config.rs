//! Runtime configuration
//!
//! Every setting has a default matching the layout of a quiz checkout
//! (`data.csv`, `images/`, `predictions.db` in the working directory) and
//! can be overridden through an `AGE_DUEL_*` environment variable.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// CSV file with true ages and model predictions
    pub data_file: PathBuf,
    /// Directory the photo filenames are resolved against
    pub images_dir: PathBuf,
    /// Extension used when the dataset has no image column
    pub image_extension: String,
    /// SQLite file holding the `predictions` table
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Idle sessions older than this are evicted
    pub session_ttl_minutes: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.csv"),
            images_dir: PathBuf::from("images"),
            image_extension: "png".to_string(),
            db_path: PathBuf::from("predictions.db"),
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_ttl_minutes: 60,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("AGE_DUEL_DATA_FILE") {
            config.data_file = PathBuf::from(value);
        }
        if let Some(value) = lookup("AGE_DUEL_IMAGES_DIR") {
            config.images_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("AGE_DUEL_IMAGE_EXT") {
            config.image_extension = value.trim_start_matches('.').to_string();
        }
        if let Some(value) = lookup("AGE_DUEL_DB_PATH") {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("AGE_DUEL_HOST") {
            config.host = value;
        }
        if let Some(value) = lookup("AGE_DUEL_PORT") {
            config.port = parse_var("AGE_DUEL_PORT", value)?;
        }
        if let Some(value) = lookup("AGE_DUEL_SESSION_TTL_MINUTES") {
            let minutes: i64 = parse_var("AGE_DUEL_SESSION_TTL_MINUTES", value.clone())?;
            if minutes <= 0 {
                return Err(ConfigError::Invalid {
                    var: "AGE_DUEL_SESSION_TTL_MINUTES",
                    value,
                });
            }
            config.session_ttl_minutes = minutes;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}
