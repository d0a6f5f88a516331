use super::ports::{AuthError, IdentityProvider, Profile};
use async_trait::async_trait;
use config::GoogleCredentials;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    Scope, TokenResponse, TokenUrl,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

// Type alias for a fully configured OAuth client
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google OAuth client driving the authorization-code flow
#[derive(Debug)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    http_client: Client,
}

impl GoogleOAuth {
    pub fn new(credentials: GoogleCredentials, redirect_url: String) -> Result<Self, AuthError> {
        let auth_url = AuthUrl::new("https://accounts.google.com/o/oauth2/v2/auth".to_string())
            .map_err(|e| AuthError::ConfigError(format!("Invalid Google auth URL: {}", e)))?;

        let token_url = TokenUrl::new("https://www.googleapis.com/oauth2/v3/token".to_string())
            .map_err(|e| AuthError::ConfigError(format!("Invalid Google token URL: {}", e)))?;

        let client = BasicClient::new(ClientId::new(credentials.client_id))
            .set_client_secret(ClientSecret::new(credentials.client_secret))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(
                RedirectUrl::new(redirect_url)
                    .map_err(|e| AuthError::ConfigError(format!("Invalid redirect URL: {}", e)))?,
            );

        Ok(Self {
            client,
            http_client: Client::new(),
        })
    }

    /// Fetch the visitor's profile from the userinfo endpoint
    async fn fetch_google_user(&self, access_token: &str) -> Result<Profile, AuthError> {
        debug!("Fetching Google user info with access token");

        let response = self
            .http_client
            .get(USERINFO_URL)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(format!("Failed to fetch Google user: {}", e)))?;

        let status = response.status();
        debug!("Google API response status: {}", status);

        if !status.is_success() {
            let response_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(AuthError::AuthFailed(format!(
                "Google API returned status: {}, body: {}",
                status, response_text
            )));
        }

        let user: GoogleUser = response
            .json()
            .await
            .map_err(|e| AuthError::AuthFailed(format!("Failed to parse Google user: {}", e)))?;

        Ok(Profile {
            email: user.email,
            name: user.name,
            picture: user.picture,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuth {
    fn authorize_url(&self) -> String {
        let (auth_url, _csrf_state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new(
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
            ))
            .add_scope(Scope::new(
                "https://www.googleapis.com/auth/userinfo.profile".to_string(),
            ))
            .add_extra_param("access_type", "offline")
            .add_extra_param("include_granted_scopes", "true")
            .url();

        auth_url.to_string()
    }

    async fn exchange_code(&self, code: String) -> Result<Profile, AuthError> {
        debug!("Exchanging Google code for token");

        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::OAuthError(format!("Token exchange failed: {}", e)))?;

        let access_token = token.access_token().secret();

        self.fetch_google_user(access_token).await
    }
}

#[derive(Debug, Deserialize)]
struct GoogleUser {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GoogleOAuth {
        GoogleOAuth::new(
            GoogleCredentials {
                client_id: "test-client-id".to_string(),
                client_secret: "test-secret".to_string(),
            },
            "http://localhost:8502/".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_authorize_url_carries_scopes_and_offline_access() {
        let url = test_client().authorize_url();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
        assert!(url.contains("client_id=test-client-id"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("include_granted_scopes=true"));
        assert!(url.contains("openid"));
        assert!(url.contains("userinfo.email"));
    }

    #[test]
    fn test_invalid_redirect_url_is_a_config_error() {
        let err = GoogleOAuth::new(
            GoogleCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            },
            "not a url".to_string(),
        )
        .unwrap_err();

        assert!(matches!(err, AuthError::ConfigError(_)));
    }
}
