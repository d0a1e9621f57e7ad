//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid input reference: {0}")]
    InvalidReference(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Client initialization failed: {0}")]
    Initialization(String),

    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Permission denied: {0}. Ensure the Generative Language API is enabled and the API key is valid")]
    Permission(String),

    #[error("Model or region not found: {0}. Check GEMINI_IMAGE_MODEL and the project configuration")]
    ModelOrRegion(String),

    #[error("API error: {0}")]
    Provider(String),

    #[error("Failed to write output to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Transient errors are the only class worth retrying: the service
    /// signalled temporary unavailability and a later identical attempt may
    /// succeed without caller intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::ServiceUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
