use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PfCertError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("pfSense API error (HTTP {status}): {message}")]
    PfSenseApi { status: u16, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PfCertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PfCertError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PfCertError>;
