//! # API crate: OAuth provider registration for the accounts service
//!
//! Mounts third-party sign-in (Google, GitHub) on an Axum router together with
//! the session layer that carries the login between the OAuth callback and
//! the front-end.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`accounts`] | [`Accounts`] store turning a provider profile into a [`LoginInfo`] (Postgres and in-memory) |
//! | [`auth`] | OAuth adapters, session payloads, the registrar and the `/auth` + `/providers` handlers |
//! | [`db`] | PostgreSQL pool and migrations |
//! | [`error`] | [`AuthError`] / [`AccountsError`] |
//! | [`settings`] | [`Settings`] loaded from `config.toml` and the environment |
//!
//! The entry point is [`register_providers`].

pub mod accounts;
pub mod auth;
pub mod db;
pub mod error;
mod link;
pub mod settings;

pub use accounts::{Accounts, LoginInfo, MemoryAccounts, PgAccounts, ProviderProfile};
pub use auth::{register_providers, AuthProvider, Registration, SessionUser};
pub use error::{AccountsError, AuthError};
pub use link::concat_link;
pub use settings::Settings;
