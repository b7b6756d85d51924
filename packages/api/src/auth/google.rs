//! # Google sign-in adapter
//!
//! Requests the `openid`, `email` and `profile` scopes and reads the user
//! from the Google userinfo endpoint. Enabled when `GOOGLE_CLIENT_ID` and
//! `GOOGLE_CLIENT_SECRET` are set.

use async_trait::async_trait;
use axum::Router;
use serde::Deserialize;

use super::config::{OAuthConfig, ProviderEndpoints};
use super::oauth::{OAuthFlow, ProfileSource};
use super::provider::{AuthProvider, ProviderContext};
use crate::accounts::{split_name, ProviderProfile};
use crate::error::AuthError;
use crate::link::concat_link;

const NAME: &str = "google";
const SCOPES: &[&str] = &["openid", "email", "profile"];
const USERINFO_PATH: &str = "/oauth2/v2/userinfo";

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: String,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

impl GoogleUser {
    fn into_profile(self) -> ProviderProfile {
        let (first_name, last_name) = match (self.given_name, self.family_name) {
            (Some(given), family) if !given.is_empty() => (given, family.unwrap_or_default()),
            _ => split_name(self.name.as_deref(), &self.email),
        };
        ProviderProfile {
            provider: NAME.to_string(),
            provider_id: self.id,
            username: self.email.clone(),
            email: self.email,
            first_name,
            last_name,
            avatar_url: self.picture,
        }
    }
}

struct GoogleProfiles {
    api_url: String,
}

#[async_trait]
impl ProfileSource for GoogleProfiles {
    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<ProviderProfile, AuthError> {
        let user: GoogleUser = http
            .get(concat_link(&self.api_url, USERINFO_PATH))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(user.into_profile())
    }
}

/// Google provider adapter.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    endpoints: ProviderEndpoints,
}

impl GoogleProvider {
    pub fn with_endpoints(endpoints: ProviderEndpoints) -> Self {
        Self { endpoints }
    }
}

impl Default for GoogleProvider {
    fn default() -> Self {
        Self::with_endpoints(ProviderEndpoints::google())
    }
}

impl AuthProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn register(&self, ctx: &ProviderContext) -> Option<Router> {
        let profiles = GoogleProfiles {
            api_url: self.endpoints.api_url.clone(),
        };
        let flow = OAuthConfig::google(&ctx.settings, &ctx.accounts_url, &self.endpoints)
            .and_then(|config| OAuthFlow::new(NAME, SCOPES, config, profiles, ctx.clone()));

        match flow {
            Ok(flow) => Some(flow.into_router()),
            Err(e) => {
                tracing::info!("Google sign-in disabled: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_userinfo() {
        let user: GoogleUser = serde_json::from_str(
            r#"{
                "id": "1089",
                "email": "ada@example.com",
                "verified_email": true,
                "name": "Ada King Lovelace",
                "given_name": "Ada",
                "family_name": "King Lovelace",
                "picture": "https://lh3.example/ada.png"
            }"#,
        )
        .unwrap();

        let profile = user.into_profile();
        assert_eq!(profile.provider, "google");
        assert_eq!(profile.provider_id, "1089");
        assert_eq!(profile.username, "ada@example.com");
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.last_name, "King Lovelace");
        assert_eq!(profile.avatar_url.as_deref(), Some("https://lh3.example/ada.png"));
    }

    #[test]
    fn test_profile_without_given_name() {
        let user: GoogleUser =
            serde_json::from_str(r#"{"id": "7", "email": "plato@example.com", "name": "Plato"}"#)
                .unwrap();

        let profile = user.into_profile();
        assert_eq!(profile.first_name, "Plato");
        assert_eq!(profile.last_name, "");
        assert!(profile.avatar_url.is_none());
    }
}
