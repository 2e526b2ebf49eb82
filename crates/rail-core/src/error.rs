//! Core error type.

use thiserror::Error;

/// Errors raised while parsing times, distributions, and configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `rail-core`.
pub type CoreResult<T> = Result<T, CoreError>;
