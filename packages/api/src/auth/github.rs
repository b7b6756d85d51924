//! # GitHub sign-in adapter
//!
//! Requests the `user:email` and `read:user` scopes. The profile comes from
//! `api.github.com/user`; when the user keeps their email private, the
//! primary verified address from `/user/emails` is used instead. Enabled
//! when `GITHUB_CLIENT_ID` and `GITHUB_CLIENT_SECRET` are set.

use async_trait::async_trait;
use axum::Router;
use serde::Deserialize;

use super::config::{OAuthConfig, ProviderEndpoints};
use super::oauth::{OAuthFlow, ProfileSource};
use super::provider::{AuthProvider, ProviderContext};
use crate::accounts::{split_name, ProviderProfile};
use crate::error::AuthError;
use crate::link::concat_link;

const NAME: &str = "github";
const SCOPES: &[&str] = &["user:email", "read:user"];
const USER_AGENT: &str = "accounts-auth";

/// GitHub user info from API.
#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

/// GitHub email info from API.
#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

impl GitHubUser {
    fn into_profile(self, email: String) -> ProviderProfile {
        let (first_name, last_name) = split_name(self.name.as_deref(), &self.login);
        ProviderProfile {
            provider: NAME.to_string(),
            provider_id: self.id.to_string(),
            email,
            username: self.login,
            first_name,
            last_name,
            avatar_url: self.avatar_url,
        }
    }
}

fn primary_email(emails: Vec<GitHubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}

struct GitHubProfiles {
    api_url: String,
}

impl GitHubProfiles {
    async fn get<T: serde::de::DeserializeOwned>(
        http: &reqwest::Client,
        url: &str,
        access_token: &str,
    ) -> Result<T, AuthError> {
        Ok(http
            .get(url)
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl ProfileSource for GitHubProfiles {
    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<ProviderProfile, AuthError> {
        let user_url = concat_link(&self.api_url, "/user");
        let user: GitHubUser = Self::get(http, &user_url, access_token).await?;

        let email = match user.email.clone().filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => {
                let emails_url = concat_link(&self.api_url, "/user/emails");
                let emails: Vec<GitHubEmail> = Self::get(http, &emails_url, access_token).await?;
                primary_email(emails).ok_or(AuthError::MissingEmail)?
            }
        };

        Ok(user.into_profile(email))
    }
}

/// GitHub provider adapter.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    endpoints: ProviderEndpoints,
}

impl GitHubProvider {
    /// Adapter talking to `endpoints` instead of github.com, e.g. GitHub
    /// Enterprise.
    pub fn with_endpoints(endpoints: ProviderEndpoints) -> Self {
        Self { endpoints }
    }
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::with_endpoints(ProviderEndpoints::github())
    }
}

impl AuthProvider for GitHubProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn register(&self, ctx: &ProviderContext) -> Option<Router> {
        let profiles = GitHubProfiles {
            api_url: self.endpoints.api_url.clone(),
        };
        let flow = OAuthConfig::github(&ctx.settings, &ctx.accounts_url, &self.endpoints)
            .and_then(|config| OAuthFlow::new(NAME, SCOPES, config, profiles, ctx.clone()));

        match flow {
            Ok(flow) => Some(flow.into_router()),
            Err(e) => {
                tracing::info!("GitHub sign-in disabled: {}", e);
                None
            }
        }
    }
}
