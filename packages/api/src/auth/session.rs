//! Session keys and payloads.

use serde::{Deserialize, Serialize};

use crate::accounts::{LoginInfo, ProviderProfile};

/// Key for the logged-in user.
pub const SESSION_USER_KEY: &str = "user";

/// Key for the [`LoginInfo`] returned by `GET /auth`.
pub const LOGIN_INFO_KEY: &str = "login_info";

/// Key for the OAuth state kept between the redirect and the callback.
pub const PENDING_AUTH_KEY: &str = "oauth_pending";

/// The user fields persisted in the session. Nothing else of the provider
/// profile is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl SessionUser {
    pub fn new(login: &LoginInfo, profile: &ProviderProfile) -> Self {
        Self {
            id: login.account.clone(),
            username: profile.username.clone(),
            name: profile.display_name(),
        }
    }
}

/// CSRF state and PKCE verifier of an authorization in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAuthorization {
    pub provider: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

impl PendingAuthorization {
    /// Whether a callback for `provider` carrying `state` belongs to this
    /// authorization.
    pub fn matches(&self, provider: &str, state: &str) -> bool {
        self.provider == provider && self.csrf_state == state
    }
}
