//! OAuth client configuration built from [`Settings`].

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::error::AuthError;
use crate::link::concat_link;
use crate::settings::Settings;

/// Where a provider lives: its consent page, token endpoint and the base
/// url of the API the profile is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl ProviderEndpoints {
    pub fn github() -> Self {
        Self {
            auth_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            api_url: "https://api.github.com".to_string(),
        }
    }

    pub fn google() -> Self {
        Self {
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            api_url: "https://www.googleapis.com".to_string(),
        }
    }
}

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// GitHub config; callbacks land on `{accounts_url}/auth/github/callback`.
    pub fn github(
        settings: &Settings,
        accounts_url: &str,
        endpoints: &ProviderEndpoints,
    ) -> Result<Self, AuthError> {
        Self::build(
            required(&settings.github_client_id, "GITHUB_CLIENT_ID")?,
            required(&settings.github_client_secret, "GITHUB_CLIENT_SECRET")?,
            endpoints,
            concat_link(accounts_url, "/auth/github/callback"),
        )
    }

    /// Google config; callbacks land on `{accounts_url}/auth/google/callback`.
    pub fn google(
        settings: &Settings,
        accounts_url: &str,
        endpoints: &ProviderEndpoints,
    ) -> Result<Self, AuthError> {
        Self::build(
            required(&settings.google_client_id, "GOOGLE_CLIENT_ID")?,
            required(&settings.google_client_secret, "GOOGLE_CLIENT_SECRET")?,
            endpoints,
            concat_link(accounts_url, "/auth/google/callback"),
        )
    }

    fn build(
        client_id: String,
        client_secret: String,
        endpoints: &ProviderEndpoints,
        redirect_url: String,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new(endpoints.auth_url.clone())?,
            token_url: TokenUrl::new(endpoints.token_url.clone())?,
            redirect_url: RedirectUrl::new(redirect_url)?,
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, AuthError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(AuthError::NotConfigured(name))
}
