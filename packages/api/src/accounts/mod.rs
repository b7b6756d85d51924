//! # Accounts: turning a provider profile into a login
//!
//! After a provider adapter has completed the OAuth exchange it hands a
//! normalized [`ProviderProfile`] to an [`Accounts`] store, which finds or
//! creates the matching account and issues a fresh login token. The result,
//! [`LoginInfo`], is what the front-end reads back from `GET /auth`.
//!
//! | Type | Backing |
//! |------|---------|
//! | [`PgAccounts`] | `accounts` table in PostgreSQL, upserted on `(provider, provider_id)` |
//! | [`MemoryAccounts`] | process memory; used without a database and in tests |

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AccountsError;

mod memory;
mod postgres;

pub use memory::MemoryAccounts;
pub use postgres::PgAccounts;

/// Profile reported by a provider after sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Provider name: `"google"` or `"github"`.
    pub provider: String,
    /// User id at the provider.
    pub provider_id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

impl ProviderProfile {
    /// Display name built from first and last name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Split a display name into first and last name.
///
/// Falls back to `username` as the first name when `display_name` is empty.
pub(crate) fn split_name(display_name: Option<&str>, username: &str) -> (String, String) {
    let name = display_name.map(str::trim).filter(|n| !n.is_empty());
    match name {
        Some(name) => match name.split_once(char::is_whitespace) {
            Some((first, last)) => (first.to_string(), last.trim().to_string()),
            None => (name.to_string(), String::new()),
        },
        None => (username.to_string(), String::new()),
    }
}

/// Result of a successful provider login, stored in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginInfo {
    pub account: String,
    pub email: String,
    pub token: String,
    pub product_id: String,
}

/// Store of accounts that can be signed into through a provider.
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Find or create the account for `profile` and issue a new token.
    async fn login_with_provider(
        &self,
        product_id: &str,
        profile: &ProviderProfile,
    ) -> Result<LoginInfo, AccountsError>;
}

/// Random 32-byte login token, hex encoded.
pub(crate) fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

fn require_email(profile: &ProviderProfile) -> Result<(), AccountsError> {
    if profile.email.trim().is_empty() {
        return Err(AccountsError::MissingEmail {
            provider: profile.provider.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name(Some("Ada Lovelace"), "ada"), ("Ada".into(), "Lovelace".into()));
        assert_eq!(
            split_name(Some("Jean  Luc Picard"), "jlp"),
            ("Jean".into(), "Luc Picard".into())
        );
        assert_eq!(split_name(Some("Plato"), "plato"), ("Plato".into(), String::new()));
        assert_eq!(split_name(Some("  "), "octocat"), ("octocat".into(), String::new()));
        assert_eq!(split_name(None, "octocat"), ("octocat".into(), String::new()));
    }

    #[test]
    fn test_generate_token() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
