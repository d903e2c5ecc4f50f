//! Error types for the prop board

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Projection not found: {0}")]
    ProjectionNotFound(String),

    #[error("Lineup is full ({max} picks max)")]
    LineupFull { max: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for BoardError {
    fn from(e: config::ConfigError) -> Self {
        BoardError::Config(e.to_string())
    }
}
