use crate::session::{store_session, visitor_session};
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

/// Initiate the Google OAuth flow - redirects to the provider
pub async fn google_login(State(state): State<AppState>) -> Response {
    debug!("Initiating Google OAuth flow");

    match state.gate.authorize_url() {
        Some(auth_url) => Redirect::to(&auth_url).into_response(),
        None => {
            // Login is disabled; the dashboard page explains why.
            error!("Login requested but no OAuth provider is configured");
            Redirect::to("/").into_response()
        }
    }
}

/// Logout: clears the visitor's session, deletes the persisted auth
/// record, and redirects to the bare page URL so no residual query
/// parameters survive.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (session_id, mut session, jar) = visitor_session(&state.sessions, jar).await;

    state.gate.logout(&mut session);
    store_session(&state.sessions, session_id, session).await;

    (jar, Redirect::to("/")).into_response()
}
