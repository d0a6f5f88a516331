use crate::card::performance_card;
use crate::session::{store_session, visitor_session};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use services::{Profile, Resolution};
use tracing::debug;

#[derive(Deserialize)]
pub struct DashboardQuery {
    /// OAuth authorization code, present only on the provider redirect back
    pub code: Option<String>,
}

/// Dashboard host page. Runs the session gate on every render; the gate's
/// resolution decides whether the visitor sees the dashboard, the login
/// prompt, or an error page. This route is also the OAuth redirect target,
/// so a `?code=` callback lands here too.
pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let (session_id, mut session, jar) = visitor_session(&state.sessions, jar).await;
    let had_code = query.code.is_some();

    let resolution = state.gate.resolve(&mut session, query.code).await;
    store_session(&state.sessions, session_id, session).await;

    if had_code {
        // Strip the consumed code from the visible URL regardless of
        // outcome, so a refresh can never re-submit it; the next render
        // surfaces the result.
        debug!("Callback consumed, redirecting to bare page URL");
        return (jar, Redirect::to("/")).into_response();
    }

    match resolution {
        Resolution::Authenticated(profile) => {
            (jar, Html(render_dashboard(&profile))).into_response()
        }
        Resolution::LoginPrompt { authorize_url } => {
            (jar, Html(render_login_page(&authorize_url))).into_response()
        }
        Resolution::LoginUnavailable { reason } => (
            jar,
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(render_config_error(&reason)),
            ),
        )
            .into_response(),
        Resolution::Failed {
            message,
            authorize_url,
        } => (
            jar,
            (
                StatusCode::UNAUTHORIZED,
                Html(render_auth_error(&message, &authorize_url)),
            ),
        )
            .into_response(),
    }
}

const PAGE_STYLE: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0;
    min-height: 100vh;
    background: #111827;
    color: #f9fafb;
}
.container {
    max-width: 960px;
    margin: 0 auto;
    padding: 2rem;
}
.topbar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 1.5rem;
}
.cards {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 16px;
}
.login-btn, .logout-btn, .retry-btn {
    display: inline-block;
    padding: 0.75rem 1.5rem;
    border: none;
    border-radius: 8px;
    background: #3b82f6;
    color: white;
    text-decoration: none;
    font-size: 1rem;
    font-weight: 500;
    cursor: pointer;
}
.logout-btn { background: #4b5563; }
.error-box {
    background: #7f1d1d;
    border-radius: 8px;
    padding: 1rem 1.5rem;
    margin-bottom: 1.5rem;
}
"#;

fn render_dashboard(profile: &Profile) -> String {
    let cards = [
        performance_card(
            "Quarterly Revenue",
            "0.92",
            "Performance Score",
            "Meets Expectations",
            "green",
            "Ranked 3rd of 12 regions",
        ),
        performance_card(
            "Pipeline Coverage",
            "2.4x",
            "Open Pipeline vs Target",
            "Needs Attention",
            "orange",
            "Coverage below the 3x guideline",
        ),
        performance_card(
            "Win Rate",
            "31%",
            "Closed Won / Closed Total",
            "Exceeds Expectations",
            "blue",
            "Best quarter on record",
        ),
    ]
    .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="topbar">
            <h1>&#127919; Sales Performance Dashboard</h1>
            <form method="post" action="/auth/logout">
                <button class="logout-btn" type="submit">Logout</button>
            </form>
        </div>
        <p>Logged in as: {name} ({email})</p>
        <div class="cards">
{cards}
        </div>
    </div>
</body>
</html>"#,
        name = profile.display_name(),
        email = profile.email,
    )
}

fn render_login_page(authorize_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard - Login</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Please login to continue</h1>
        <a class="login-btn" href="{authorize_url}">&#128272; Sign in with Google</a>
    </div>
</body>
</html>"#
    )
}

fn render_auth_error(message: &str, authorize_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard - Error</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Please login to continue</h1>
        <div class="error-box">{message}</div>
        <p><a class="retry-btn" href="/">Try Again</a></p>
        <p><a class="login-btn" href="{authorize_url}">&#128272; Sign in with Google</a></p>
    </div>
</body>
</html>"#
    )
}

fn render_config_error(reason: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard - Configuration Error</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Login is not available</h1>
        <div class="error-box">{reason}</div>
    </div>
</body>
</html>"#
    )
}
