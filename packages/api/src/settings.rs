//! # Service settings
//!
//! Loaded with the `config` crate from three layers, later ones winning:
//!
//! 1. built-in defaults (`listen_addr`, `product_id`),
//! 2. an optional `config.toml` in the working directory,
//! 3. environment variables, matched case-insensitively against the field
//!    names (`ACCOUNTS_URL` → `accounts_url`, `GOOGLE_CLIENT_ID` →
//!    `google_client_id`, ...).
//!
//! `.env` files are picked up through `dotenvy` before the environment is
//! read.

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Public base url of this service; OAuth callbacks are built from it.
    pub accounts_url: Option<String>,
    /// Base url of the front-end the user is sent back to.
    pub front_url: Option<String>,
    /// Secret the session cookies are signed with.
    pub server_secret: String,
    #[serde(default)]
    pub product_id: String,
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub github_client_id: Option<String>,
    pub github_client_secret: Option<String>,
}

impl Settings {
    /// Load settings from `config.toml` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_sources(None)
    }

    /// Same as [`Settings::load`] but reading variables from `env` instead
    /// of the process environment.
    pub fn from_env_map(env: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_sources(Some(env))
    }

    fn from_sources(env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("listen_addr", "0.0.0.0:8080")?
            .set_default("product_id", "")?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().source(env))
            .build()?
            .try_deserialize()
    }

    /// Settings with every optional value unset. Handy for tests and tools.
    pub fn with_secret(server_secret: impl Into<String>) -> Self {
        Self {
            accounts_url: None,
            front_url: None,
            server_secret: server_secret.into(),
            product_id: String::new(),
            database_url: None,
            listen_addr: "0.0.0.0:8080".to_string(),
            google_client_id: None,
            google_client_secret: None,
            github_client_id: None,
            github_client_secret: None,
        }
    }
}
