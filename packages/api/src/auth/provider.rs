use std::sync::Arc;

use axum::Router;

use super::github::GitHubProvider;
use super::google::GoogleProvider;
use crate::accounts::Accounts;
use crate::settings::Settings;

/// What every provider adapter gets to work with.
#[derive(Clone)]
pub struct ProviderContext {
    pub accounts_url: String,
    pub front_url: String,
    pub product_id: String,
    pub accounts: Arc<dyn Accounts>,
    pub settings: Settings,
}

/// A third-party sign-in provider.
pub trait AuthProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Routes of this provider, or `None` when it is not configured.
    fn register(&self, ctx: &ProviderContext) -> Option<Router>;
}

/// Built-in providers, in the order they are offered.
pub fn default_providers() -> Vec<Box<dyn AuthProvider>> {
    vec![
        Box::new(GoogleProvider::default()),
        Box::new(GitHubProvider::default()),
    ]
}
