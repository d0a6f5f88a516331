#![allow(dead_code)]

use api::{build_app, session::new_session_store, AppState};
use async_trait::async_trait;
use axum_test::TestServer;
use services::auth::{AuthError, IdentityProvider, MockIdentityProvider};
use services::{AuthCache, Profile, SessionGate};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TEST_EMAIL: &str = "admin@test.com";

/// Path of the persisted auth record inside a test's temp dir
pub fn cache_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".dashboard_auth")
}

/// App state wired to the mock identity provider and a temp-dir auth cache
pub fn test_state(dir: &tempfile::TempDir) -> AppState {
    AppState {
        gate: Arc::new(SessionGate::new(
            Arc::new(MockIdentityProvider::default()),
            AuthCache::new(cache_path(dir)),
        )),
        sessions: new_session_store(),
    }
}

/// App state with login disabled, as when google_credentials.json is missing
pub fn test_state_without_provider(dir: &tempfile::TempDir) -> AppState {
    AppState {
        gate: Arc::new(SessionGate::without_provider(
            "Credentials file not found: google_credentials.json".to_string(),
            AuthCache::new(cache_path(dir)),
        )),
        sessions: new_session_store(),
    }
}

/// Provider that rejects every code and counts exchange attempts, for
/// asserting a code is never exchanged more than once.
pub struct RejectingProvider {
    pub exchanges: Arc<AtomicUsize>,
}

#[async_trait]
impl IdentityProvider for RejectingProvider {
    fn authorize_url(&self) -> String {
        "https://accounts.google.com/o/oauth2/v2/auth?mock=true".to_string()
    }

    async fn exchange_code(&self, _code: String) -> Result<Profile, AuthError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        Err(AuthError::OAuthError(
            "Token exchange failed: access_denied".to_string(),
        ))
    }
}

/// App state whose provider fails every exchange, returning the attempt
/// counter alongside.
pub fn test_state_rejecting(dir: &tempfile::TempDir) -> (AppState, Arc<AtomicUsize>) {
    let exchanges = Arc::new(AtomicUsize::new(0));
    let state = AppState {
        gate: Arc::new(SessionGate::new(
            Arc::new(RejectingProvider {
                exchanges: exchanges.clone(),
            }),
            AuthCache::new(cache_path(dir)),
        )),
        sessions: new_session_store(),
    };
    (state, exchanges)
}

pub fn setup_test_server(state: AppState) -> TestServer {
    TestServer::builder()
        .save_cookies()
        .build(build_app(state))
        .unwrap()
}

pub fn test_profile() -> Profile {
    Profile {
        email: TEST_EMAIL.to_string(),
        name: Some("Test User".to_string()),
        picture: None,
    }
}
