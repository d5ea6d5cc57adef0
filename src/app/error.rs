use thiserror::Error;

use crate::config::ConfigError;
use crate::loader::LoadError;

#[derive(Error, Debug)]
pub enum EpisodicError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, EpisodicError>;
