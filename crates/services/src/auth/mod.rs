pub mod oauth;
pub mod ports;
pub mod store;

pub use oauth::GoogleOAuth;
pub use ports::*;
pub use store::{AuthCache, CacheLoad};

use std::sync::Arc;
use tracing::{debug, info};

/// Decides, once per page render, whether the current visitor is
/// authenticated, and drives the OAuth authorization-code flow when not.
///
/// Evaluation order per render: in-memory session, then the persisted auth
/// record, then an inbound authorization code, falling through to the login
/// affordance. One state evaluation per call; re-evaluation happens only
/// because the page is re-requested on every interaction.
pub struct SessionGate {
    provider: Option<Arc<dyn IdentityProvider>>,
    unavailable_reason: String,
    cache: AuthCache,
}

impl SessionGate {
    pub fn new(provider: Arc<dyn IdentityProvider>, cache: AuthCache) -> Self {
        Self {
            provider: Some(provider),
            unavailable_reason: String::new(),
            cache,
        }
    }

    /// Gate with login disabled, e.g. when google_credentials.json is
    /// missing. Every unauthenticated render resolves to LoginUnavailable.
    pub fn without_provider(reason: String, cache: AuthCache) -> Self {
        Self {
            provider: None,
            unavailable_reason: reason,
            cache,
        }
    }

    /// Resolve login state for this render.
    ///
    /// `session` is the visitor's session record and is mutated in place;
    /// `code` is the inbound authorization code, if the request carried one.
    /// The code is consumed exactly once; success and failure both expect
    /// the caller to strip it from the visible request state afterwards.
    pub async fn resolve(&self, session: &mut SessionRecord, code: Option<String>) -> Resolution {
        let mut state = if session.authenticated {
            GateState::Authenticated
        } else {
            GateState::Unauthenticated
        };

        // A previously persisted record counts as authentication on its own.
        if state == GateState::Unauthenticated {
            if let Some(profile) = self.cache.load() {
                debug!(email = %profile.email, "Restored session from persisted auth record");
                session.login(profile);
                state = GateState::Authenticated;
            }
        }

        if state == GateState::Authenticated {
            if let Some(profile) = session.user_info.clone() {
                return Resolution::Authenticated(profile);
            }
            // Authenticated without a profile is unreachable through the
            // normal transitions; recover by resetting.
            session.reset();
        }

        let provider = match &self.provider {
            Some(provider) => provider,
            None => {
                return Resolution::LoginUnavailable {
                    reason: self.unavailable_reason.clone(),
                }
            }
        };

        if let Some(code) = code {
            state = GateState::CallbackPending;
            debug!(?state, "Handling OAuth callback");

            match provider.exchange_code(code).await {
                Ok(profile) => {
                    info!(email = %profile.email, "Visitor authenticated");
                    session.login(profile.clone());
                    self.cache.save(&profile);
                    return Resolution::Authenticated(profile);
                }
                Err(e) => {
                    debug!(error = %e, "OAuth callback failed");
                    let message = format!("Authentication failed: {}", e);
                    session.reset();
                    // Recorded on the session so the failure survives the
                    // redirect that strips the code from the URL; the next
                    // render consumes it.
                    session.login_error = Some(message.clone());
                    return Resolution::Failed {
                        message,
                        authorize_url: provider.authorize_url(),
                    };
                }
            }
        }

        // Surface a failure recorded by the previous render, exactly once.
        if let Some(message) = session.login_error.take() {
            return Resolution::Failed {
                message,
                authorize_url: provider.authorize_url(),
            };
        }

        Resolution::LoginPrompt {
            authorize_url: provider.authorize_url(),
        }
    }

    /// Authorization URL for the login affordance; None when login is
    /// disabled.
    pub fn authorize_url(&self) -> Option<String> {
        self.provider.as_ref().map(|p| p.authorize_url())
    }

    /// Explicit logout: clears the session record and deletes the
    /// persisted auth record. The caller strips any residual request
    /// parameters by redirecting.
    pub fn logout(&self, session: &mut SessionRecord) {
        if let Some(profile) = &session.user_info {
            info!(email = %profile.email, "Visitor logged out");
        }
        session.reset();
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_gate(dir: &tempfile::TempDir) -> SessionGate {
        SessionGate::new(
            Arc::new(MockIdentityProvider::default()),
            AuthCache::new(dir.path().join(".dashboard_auth")),
        )
    }

    fn persisted(dir: &tempfile::TempDir) -> Option<Profile> {
        AuthCache::new(dir.path().join(".dashboard_auth")).load()
    }

    #[tokio::test]
    async fn test_fresh_visitor_gets_login_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let gate = mock_gate(&dir);
        let mut session = SessionRecord::default();

        let resolution = gate.resolve(&mut session, None).await;

        assert!(matches!(resolution, Resolution::LoginPrompt { .. }));
        assert!(!resolution.is_authenticated());
        assert!(!session.authenticated);
    }

    #[tokio::test]
    async fn test_callback_code_authenticates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let gate = mock_gate(&dir);
        let mut session = SessionRecord::default();

        let resolution = gate
            .resolve(&mut session, Some("valid-code".to_string()))
            .await;

        assert!(resolution.is_authenticated());
        assert!(session.authenticated);
        assert_eq!(
            session.user_info.as_ref().map(|p| p.email.as_str()),
            Some("admin@test.com")
        );
        assert!(persisted(&dir).is_some());
    }

    #[tokio::test]
    async fn test_failed_exchange_resets_session_and_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gate = mock_gate(&dir);
        let mut session = SessionRecord::default();

        let resolution = gate.resolve(&mut session, Some("deny".to_string())).await;

        match resolution {
            Resolution::Failed { message, .. } => {
                assert!(message.contains("Authentication failed"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(!session.authenticated);
        assert!(session.user_info.is_none());
        assert!(persisted(&dir).is_none());

        // The failure is surfaced once more after the redirect that strips
        // the code, together with the login affordance.
        let surfaced = gate.resolve(&mut session, None).await;
        match surfaced {
            Resolution::Failed { authorize_url, .. } => {
                assert!(!authorize_url.is_empty());
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        // After that the visitor retries cleanly.
        let retry = gate.resolve(&mut session, None).await;
        assert!(matches!(retry, Resolution::LoginPrompt { .. }));
    }

    #[tokio::test]
    async fn test_persisted_record_skips_reauthentication() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AuthCache::new(dir.path().join(".dashboard_auth"));
        cache.save(&Profile {
            email: "cached@example.com".to_string(),
            name: None,
            picture: None,
        });

        let gate = mock_gate(&dir);
        let mut session = SessionRecord::default();

        let resolution = gate.resolve(&mut session, None).await;

        match resolution {
            Resolution::Authenticated(profile) => {
                assert_eq!(profile.email, "cached@example.com");
            }
            other => panic!("expected Authenticated, got {:?}", other),
        }
        assert!(session.authenticated);
    }

    #[tokio::test]
    async fn test_authenticated_session_ignores_stray_code() {
        let dir = tempfile::tempdir().unwrap();
        let gate = mock_gate(&dir);
        let mut session = SessionRecord::default();
        session.login(Profile {
            email: "already@example.com".to_string(),
            name: None,
            picture: None,
        });

        // "deny" would fail the exchange, proving the code is never used
        // once the session already resolves.
        let resolution = gate.resolve(&mut session, Some("deny".to_string())).await;

        assert!(resolution.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let gate = mock_gate(&dir);
        let mut session = SessionRecord::default();

        gate.resolve(&mut session, Some("valid-code".to_string()))
            .await;
        assert!(persisted(&dir).is_some());

        gate.logout(&mut session);

        assert!(!session.authenticated);
        assert!(session.user_info.is_none());
        assert!(persisted(&dir).is_none());

        // A fresh render with no record and no code yields the prompt.
        let resolution = gate.resolve(&mut session, None).await;
        assert!(matches!(resolution, Resolution::LoginPrompt { .. }));
    }

    #[tokio::test]
    async fn test_missing_credentials_disable_login() {
        let dir = tempfile::tempdir().unwrap();
        let gate = SessionGate::without_provider(
            "google_credentials.json not found".to_string(),
            AuthCache::new(dir.path().join(".dashboard_auth")),
        );
        let mut session = SessionRecord::default();

        let resolution = gate.resolve(&mut session, None).await;

        match resolution {
            Resolution::LoginUnavailable { reason } => {
                assert!(reason.contains("google_credentials.json"));
            }
            other => panic!("expected LoginUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_persisted_record_still_resolves_without_provider() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AuthCache::new(dir.path().join(".dashboard_auth"));
        cache.save(&Profile {
            email: "cached@example.com".to_string(),
            name: None,
            picture: None,
        });

        let gate = SessionGate::without_provider(
            "google_credentials.json not found".to_string(),
            AuthCache::new(dir.path().join(".dashboard_auth")),
        );
        let mut session = SessionRecord::default();

        let resolution = gate.resolve(&mut session, None).await;
        assert!(resolution.is_authenticated());
    }
}
