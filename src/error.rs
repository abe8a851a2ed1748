//! Error types for content retrieval

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, querying, or rendering posts
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Content directory {0:?} is not a directory")]
    InvalidContentDir(PathBuf),

    #[error("Invalid entry {id}: {message}")]
    InvalidEntry { id: String, message: String },

    #[error("Remote API error: {status} {reason}")]
    RemoteStatus { status: u16, reason: String },

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;
