//! Core error types shared by every dynver crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DynverError {
    #[error("Resource '{path}' not found")]
    ResourceNotFound { path: String },

    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse {document}: {message}")]
    ParseError { document: String, message: String },

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DynverError>;

impl DynverError {
    /// Whether the error means the resource simply does not exist,
    /// as opposed to a transport or parsing failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
            || matches!(self, Self::HttpStatus { status: 404, .. })
    }
}
