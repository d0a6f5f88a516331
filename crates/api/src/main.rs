use api::{build_app, session::new_session_store, AppState};
use config::{ApiConfig, ConfigError, GoogleCredentials, LoggingConfig};
use services::auth::{GoogleOAuth, MockIdentityProvider};
use services::{AuthCache, SessionGate};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    init_tracing(&config.logging);

    let cache = AuthCache::new(&config.auth.cache_path);

    let gate = if config.auth.mock {
        tracing::info!("Mock authentication enabled, any authorization code is accepted");
        SessionGate::new(Arc::new(MockIdentityProvider::default()), cache)
    } else {
        match GoogleCredentials::load_from_file(&config.auth.credentials_path) {
            Ok(credentials) => {
                let provider = GoogleOAuth::new(credentials, config.auth.redirect_url.clone())
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "Failed to create Google OAuth client");
                        std::process::exit(1);
                    });
                tracing::info!("Google OAuth configured");
                SessionGate::new(Arc::new(provider), cache)
            }
            Err(e @ ConfigError::FileNotFound { .. }) => {
                // Login becomes unavailable but the service still runs;
                // visitors see the configuration error instead.
                tracing::error!(error = %e, "Login disabled");
                SessionGate::without_provider(e.to_string(), cache)
            }
            Err(e) => {
                tracing::error!(error = %e, "Login disabled, credentials file unreadable");
                SessionGate::without_provider(e.to_string(), cache)
            }
        }
    };

    let state = AppState {
        gate: Arc::new(gate),
        sessions: new_session_store(),
    };

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    tracing::info!(address = %bind_address, "Server started successfully");
    tracing::info!("Endpoints:");
    tracing::info!("  - GET  / (Dashboard, also the OAuth redirect target)");
    tracing::info!("  - GET  /auth/google (Redirect to Google OAuth)");
    tracing::info!("  - POST /auth/logout (Logout)");
    tracing::info!("  - GET  /health (Health check)");

    axum::serve(listener, app).await.unwrap();
}

fn init_tracing(logging_config: &LoggingConfig) {
    // Build the filter string from the logging configuration
    let mut filter = logging_config.level.clone();

    for (module, level) in &logging_config.modules {
        filter.push_str(&format!(",{}={}", module, level));
    }

    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
