use serde::Deserialize;
use std::{collections::HashMap, env};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
            auth: AuthConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8502".to_string())
                .parse()
                .map_err(|_| "SERVER_PORT must be a valid port number")?,
        })
    }
}

/// Logging Configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        if let Ok(level) = env::var("LOG_MODULE_API") {
            modules.insert("api".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_SERVICES") {
            modules.insert("services".to_string(), level);
        }

        Ok(Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            modules,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules: HashMap::new(),
        }
    }
}

/// Authentication configuration
///
/// The OAuth client id/secret live in google_credentials.json, not in the
/// environment; only the surrounding knobs are env-driven.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mock: bool,
    /// Path to the Google client-secret JSON file
    pub credentials_path: String,
    /// Where Google redirects back to after consent. Must match one of the
    /// redirect URIs registered for the OAuth client.
    pub redirect_url: String,
    /// Path of the persisted auth record
    pub cache_path: String,
}

impl AuthConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            mock: env::var("AUTH_MOCK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            credentials_path: env::var("GOOGLE_CREDENTIALS_PATH")
                .unwrap_or_else(|_| "google_credentials.json".to_string()),
            redirect_url: env::var("OAUTH_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:8502/".to_string()),
            cache_path: env::var("AUTH_CACHE_PATH")
                .unwrap_or_else(|_| ".dashboard_auth".to_string()),
        })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mock: false,
            credentials_path: "google_credentials.json".to_string(),
            redirect_url: "http://localhost:8502/".to_string(),
            cache_path: ".dashboard_auth".to_string(),
        }
    }
}

/// OAuth client credentials as stored in google_credentials.json
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Outer envelope of a Google client-secret file. Google wraps the client
/// in either a "web" or an "installed" section depending on the app type.
#[derive(Debug, Deserialize)]
pub(crate) struct CredentialsFile {
    #[serde(default)]
    pub web: Option<GoogleCredentials>,
    #[serde(default)]
    pub installed: Option<GoogleCredentials>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert!(!config.mock);
        assert_eq!(config.credentials_path, "google_credentials.json");
        assert_eq!(config.cache_path, ".dashboard_auth");
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
        assert!(config.modules.is_empty());
    }
}
