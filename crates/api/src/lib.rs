pub mod card;
pub mod routes;
pub mod session;

use crate::routes::{dashboard, google_login, health_check, logout};
use crate::session::SessionStore;
use axum::{
    routing::{get, post},
    Router,
};
use services::SessionGate;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SessionGate>,
    pub sessions: SessionStore,
}

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health_check))
        .route("/auth/google", get(google_login))
        .route("/auth/logout", post(logout))
        .with_state(state)
}
