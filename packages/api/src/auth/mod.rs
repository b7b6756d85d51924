//! # Authentication: OAuth providers and the session they log into
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `config` | [`OAuthConfig`] and [`ProviderEndpoints`]: client credentials and endpoints per provider |
//! | `oauth` | Authorization Code + PKCE flow shared by every provider, and its two routes |
//! | `google` / `github` | Provider adapters: scopes and profile lookup |
//! | `provider` | [`AuthProvider`] trait and the [`ProviderContext`] adapters receive |
//! | `registrar` | [`register_providers`]: mounts adapters, `/auth`, `/providers` and the session layer |
//! | `routes` | `GET /auth` and `GET /providers` |
//! | `session` | Session keys and payloads ([`SessionUser`], [`PendingAuthorization`]) |
//!
//! ## Routes mounted per configured provider
//!
//! - `GET /auth/{provider}`: redirects to the provider's consent page. The
//!   CSRF state and PKCE verifier are kept in the session.
//! - `GET /auth/{provider}/callback`: validates the state, exchanges the
//!   code, resolves the account through [`crate::Accounts`] and stores the
//!   [`crate::LoginInfo`] in the session before sending the user back to the
//!   front-end.

mod config;
mod github;
mod google;
mod oauth;
mod provider;
mod registrar;
mod routes;
mod session;

pub use config::{OAuthConfig, ProviderEndpoints};
pub use github::GitHubProvider;
pub use google::GoogleProvider;
pub use provider::{default_providers, AuthProvider, ProviderContext};
pub use registrar::{register_providers, register_providers_with, Registration};
pub use session::{
    PendingAuthorization, SessionUser, LOGIN_INFO_KEY, PENDING_AUTH_KEY, SESSION_USER_KEY,
};

/// Front-end path the user lands on after a successful provider login.
pub const LOGIN_DONE_PATH: &str = "/login/auth";

/// Front-end login page.
pub const LOGIN_PATH: &str = "/login";
