//! Error types for hazardmap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HazardError {
    // API errors
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HazardError {
    /// HTTP status carried by an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            HazardError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HazardError>;
