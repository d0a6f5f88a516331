use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User profile as returned by the identity provider.
///
/// Only the presence of `email` is ever validated; everything else is
/// carried through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl Profile {
    /// Name to greet the visitor with, falling back the way the original
    /// UI did when the provider omits a display name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Per-visitor authentication state for the current session.
///
/// Created on a visitor's first contact, mutated by login success, logout,
/// or failed-auth recovery, and dropped with the session itself.
#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
    pub authenticated: bool,
    pub user_info: Option<Profile>,
    /// Failure recorded by a callback render, surfaced exactly once on the
    /// next render. Lets the error survive the redirect that strips the
    /// consumed code from the visible URL.
    pub login_error: Option<String>,
}

impl SessionRecord {
    pub fn login(&mut self, profile: Profile) {
        self.authenticated = true;
        self.user_info = Some(profile);
        self.login_error = None;
    }

    pub fn reset(&mut self) {
        self.authenticated = false;
        self.user_info = None;
        self.login_error = None;
    }
}

/// Internal gate states. A render observes exactly one of these; the
/// CallbackPending state exists only while a `code` parameter is being
/// consumed within a single resolve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    CallbackPending,
    Authenticated,
}

/// Outcome of one gate evaluation, telling the page what to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Render the authenticated content and a logout control.
    Authenticated(Profile),
    /// Render a sign-in affordance pointing at the provider.
    LoginPrompt { authorize_url: String },
    /// Login is disabled (missing credentials). Static, no retry loop.
    LoginUnavailable { reason: String },
    /// Token exchange or profile fetch failed; render the error with a
    /// retry affordance and the login affordance.
    Failed {
        message: String,
        authorize_url: String,
    },
}

impl Resolution {
    /// The host-page contract: does the rest of the page render its
    /// authenticated content?
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Resolution::Authenticated(_))
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("OAuth error: {0}")]
    OAuthError(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Seam between the gate and the identity provider, so the state machine
/// can be driven in tests without network access.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization URL the visitor is redirected to.
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for an access token and fetch the
    /// user's profile with it. The code is consumed by value; callers must
    /// not retain it.
    async fn exchange_code(&self, code: String) -> Result<Profile, AuthError>;
}

/// Mock identity provider for tests and AUTH_MOCK deployments.
///
/// Accepts any code except `"deny"`, which simulates a failed token
/// exchange.
pub struct MockIdentityProvider {
    pub profile: Profile,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self {
            profile: Profile {
                email: "admin@test.com".to_string(),
                name: Some("Test User".to_string()),
                picture: None,
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    fn authorize_url(&self) -> String {
        "https://accounts.google.com/o/oauth2/v2/auth?mock=true".to_string()
    }

    async fn exchange_code(&self, code: String) -> Result<Profile, AuthError> {
        if code == "deny" {
            return Err(AuthError::OAuthError(
                "Token exchange failed: access_denied".to_string(),
            ));
        }
        Ok(self.profile.clone())
    }
}
