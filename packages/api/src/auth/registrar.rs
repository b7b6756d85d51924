//! # Provider registrar
//!
//! [`register_providers`] is the single entry point the server calls at
//! startup. Without both an accounts url and a front-end url it logs a
//! warning and leaves the router untouched, so the service still runs with
//! social login switched off.
//!
//! Otherwise every adapter is offered the same [`ProviderContext`], in order.
//! Adapters missing their credentials decline and are left out of
//! `/providers`; they never fail the whole registration.
//!
//! The session layer is installed last and therefore wraps every route the
//! router holds at that point, including ones registered by the caller.

use std::sync::Arc;

use axum::Router;
use sha2::{Digest, Sha512};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use super::provider::{default_providers, AuthProvider, ProviderContext};
use super::routes;
use crate::accounts::Accounts;
use crate::settings::Settings;

/// Sessions expire after a week without requests.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Outcome of [`register_providers`].
pub struct Registration {
    pub router: Router,
    /// Names of the providers that were configured, in registration order.
    pub providers: Vec<String>,
}

/// Register the built-in providers (Google, then GitHub).
pub fn register_providers<S>(
    router: Router,
    settings: &Settings,
    accounts: Arc<dyn Accounts>,
    session_store: S,
) -> Registration
where
    S: SessionStore + Clone,
{
    register_providers_with(router, settings, accounts, session_store, default_providers())
}

/// Register an explicit list of providers.
pub fn register_providers_with<S>(
    router: Router,
    settings: &Settings,
    accounts: Arc<dyn Accounts>,
    session_store: S,
    providers: Vec<Box<dyn AuthProvider>>,
) -> Registration
where
    S: SessionStore + Clone,
{
    let Some(accounts_url) = settings.accounts_url.clone() else {
        tracing::warn!("Please provide ACCOUNTS_URL to enable auth providers");
        return Registration {
            router,
            providers: Vec::new(),
        };
    };
    let Some(front_url) = settings.front_url.clone() else {
        tracing::warn!("Please provide FRONT_URL to enable auth providers");
        return Registration {
            router,
            providers: Vec::new(),
        };
    };

    let ctx = ProviderContext {
        accounts_url: accounts_url.clone(),
        front_url: front_url.clone(),
        product_id: settings.product_id.clone(),
        accounts,
        settings: settings.clone(),
    };

    let mut router = router;
    let mut names = Vec::new();
    for provider in &providers {
        match provider.register(&ctx) {
            Some(routes) => {
                router = router.merge(routes);
                names.push(provider.name().to_string());
            }
            None => tracing::debug!(provider = provider.name(), "Auth provider skipped"),
        }
    }

    let router = router
        .merge(routes::router(front_url, names.clone()))
        .layer(
            SessionManagerLayer::new(session_store)
                .with_secure(accounts_url.starts_with("https://"))
                .with_same_site(SameSite::Lax)
                .with_expiry(Expiry::OnInactivity(time::Duration::days(
                    SESSION_INACTIVITY_DAYS,
                )))
                .with_signed(signing_key(&settings.server_secret)),
        );

    tracing::info!(providers = ?names, "Auth providers registered");
    Registration {
        router,
        providers: names,
    }
}

/// Cookie signing key derived from the server secret.
fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_is_stable_per_secret() {
        let a = signing_key("secret");
        let b = signing_key("secret");
        let c = signing_key("other");
        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.master());
    }
}
