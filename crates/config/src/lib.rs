// Configuration Management
//
// This crate handles all configuration loading for the dashboard service.
// It provides:
// - Configuration structs and environment loading
// - The google_credentials.json loader
// - Default configuration values
//
// This keeps configuration concerns separate from the auth and web layers.

use std::path::Path;
use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Credentials file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read credentials file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse credentials file: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Credentials file has neither a \"web\" nor an \"installed\" section")]
    MissingClientSection,
}

impl GoogleCredentials {
    /// Load OAuth client credentials from a Google client-secret JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let envelope: CredentialsFile = serde_json::from_str(&content)?;

        envelope
            .web
            .or(envelope.installed)
            .ok_or(ConfigError::MissingClientSection)
    }
}
