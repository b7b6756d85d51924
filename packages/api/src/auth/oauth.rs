//! # Authorization Code + PKCE flow shared by the provider adapters
//!
//! [`OAuthFlow`] owns a configured `oauth2` client and the adapter-specific
//! [`ProfileSource`]. It serves two routes per provider:
//!
//! 1. `GET /auth/{provider}` builds the authorization url with a random PKCE
//!    challenge and CSRF token, stores both in the session as a
//!    [`PendingAuthorization`] and redirects to the provider.
//!
//! 2. `GET /auth/{provider}/callback`:
//!    - takes the [`PendingAuthorization`] out of the session and checks the
//!      returned `state` against it,
//!    - exchanges the code + PKCE verifier for an access token,
//!    - asks the [`ProfileSource`] for the user's profile,
//!    - resolves the account through [`crate::Accounts`],
//!    - rotates the session id and stores the [`SessionUser`] and the
//!      [`LoginInfo`].
//!
//! Every failure sends the user back to `{front}/login?error=<code>`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::config::OAuthConfig;
use super::provider::ProviderContext;
use super::session::{PendingAuthorization, SessionUser, LOGIN_INFO_KEY, PENDING_AUTH_KEY, SESSION_USER_KEY};
use super::{LOGIN_DONE_PATH, LOGIN_PATH};
use crate::accounts::{LoginInfo, ProviderProfile};
use crate::error::AuthError;
use crate::link::concat_link;

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Looks up the signed-in user at the provider.
#[async_trait]
pub(crate) trait ProfileSource: Send + Sync {
    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<ProviderProfile, AuthError>;
}

/// Query parameters of the provider callback.
#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub(crate) struct OAuthFlow {
    name: &'static str,
    scopes: &'static [&'static str],
    client: ConfiguredClient,
    /// Token exchange client; must not follow redirects.
    token_http: reqwest::Client,
    /// Client for the provider's user APIs.
    api_http: reqwest::Client,
    profiles: Box<dyn ProfileSource>,
    ctx: ProviderContext,
}

impl OAuthFlow {
    pub(crate) fn new(
        name: &'static str,
        scopes: &'static [&'static str],
        config: OAuthConfig,
        profiles: impl ProfileSource + 'static,
        ctx: ProviderContext,
    ) -> Result<Self, AuthError> {
        let client = BasicClient::new(config.client_id)
            .set_client_secret(config.client_secret)
            .set_auth_uri(config.auth_url)
            .set_token_uri(config.token_url)
            .set_redirect_uri(config.redirect_url);

        let token_http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            name,
            scopes,
            client,
            token_http,
            api_http: reqwest::Client::new(),
            profiles: Box::new(profiles),
            ctx,
        })
    }

    /// `GET /auth/{name}` and `GET /auth/{name}/callback`.
    pub(crate) fn into_router(self) -> Router {
        let start_path = format!("/auth/{}", self.name);
        let callback_path = format!("{start_path}/callback");
        Router::new()
            .route(&start_path, get(start))
            .route(&callback_path, get(callback))
            .with_state(Arc::new(self))
    }

    /// Authorization url plus the state to keep until the callback.
    fn authorize_url(&self) -> (String, PendingAuthorization) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.scopes.iter().map(|scope| Scope::new(scope.to_string())))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pending = PendingAuthorization {
            provider: self.name.to_string(),
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };
        (auth_url.to_string(), pending)
    }

    async fn exchange_code(&self, code: String, pkce_verifier: String) -> Result<String, AuthError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&self.token_http)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        Ok(token.access_token().secret().clone())
    }

    async fn complete(&self, params: CallbackParams, session: &Session) -> Result<LoginInfo, AuthError> {
        if let Some(error) = params.error {
            return Err(AuthError::ProviderDenied(error));
        }
        let code = params.code.ok_or(AuthError::MissingCode)?;
        let state = params.state.ok_or(AuthError::MissingState)?;

        let pending: PendingAuthorization = session
            .remove(PENDING_AUTH_KEY)
            .await?
            .ok_or(AuthError::InvalidState)?;
        if !pending.matches(self.name, &state) {
            return Err(AuthError::InvalidState);
        }

        let access_token = self.exchange_code(code, pending.pkce_verifier).await?;
        let profile = self.profiles.fetch_profile(&self.api_http, &access_token).await?;
        let login = self
            .ctx
            .accounts
            .login_with_provider(&self.ctx.product_id, &profile)
            .await?;

        session.cycle_id().await?;
        session
            .insert(SESSION_USER_KEY, SessionUser::new(&login, &profile))
            .await?;
        session.insert(LOGIN_INFO_KEY, &login).await?;

        Ok(login)
    }

    fn login_error(&self, code: &str) -> String {
        format!("{}?error={}", concat_link(&self.ctx.front_url, LOGIN_PATH), code)
    }
}

async fn start(State(flow): State<Arc<OAuthFlow>>, session: Session) -> Redirect {
    let (url, pending) = flow.authorize_url();

    if let Err(e) = session.insert(PENDING_AUTH_KEY, &pending).await {
        tracing::error!(provider = flow.name, "Failed to store OAuth state: {}", e);
        return Redirect::to(&flow.login_error("session_error"));
    }
    Redirect::to(&url)
}

async fn callback(
    State(flow): State<Arc<OAuthFlow>>,
    Query(params): Query<CallbackParams>,
    session: Session,
) -> Redirect {
    match flow.complete(params, &session).await {
        Ok(login) => {
            tracing::info!(provider = flow.name, account = %login.account, "Provider login");
            Redirect::to(&concat_link(&flow.ctx.front_url, LOGIN_DONE_PATH))
        }
        Err(e) => {
            tracing::error!(provider = flow.name, "OAuth callback failed: {}", e);
            Redirect::to(&flow.login_error(e.code()))
        }
    }
}
