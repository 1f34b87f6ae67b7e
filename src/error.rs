use std::io;
use thiserror::Error;

/// Crate-wide error type. The classifier, tracker and shaper never fail;
/// these cover the session boundary, configuration and the API.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Utterance was blank after trimming
    #[error("Empty utterance")]
    EmptyUtterance,

    /// No session registered under the given id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The server already holds its configured maximum of sessions
    #[error("Session limit reached: {0}")]
    SessionLimit(usize),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
