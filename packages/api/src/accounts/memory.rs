use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{generate_token, require_email, Accounts, LoginInfo, ProviderProfile};
use crate::error::AccountsError;

/// In-memory account store keyed by `(provider, provider_id)`.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccounts {
    accounts: Arc<Mutex<HashMap<(String, String), StoredAccount>>>,
}

#[derive(Clone, Debug)]
struct StoredAccount {
    id: Uuid,
    email: String,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct accounts created so far.
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.lock().await.is_empty()
    }
}

#[async_trait]
impl Accounts for MemoryAccounts {
    async fn login_with_provider(
        &self,
        product_id: &str,
        profile: &ProviderProfile,
    ) -> Result<LoginInfo, AccountsError> {
        require_email(profile)?;

        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .entry((profile.provider.clone(), profile.provider_id.clone()))
            .or_insert_with(|| StoredAccount {
                id: Uuid::new_v4(),
                email: profile.email.clone(),
            });
        account.email = profile.email.clone();

        Ok(LoginInfo {
            account: account.id.to_string(),
            email: account.email.clone(),
            token: generate_token(),
            product_id: product_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(provider: &str, id: &str, email: &str) -> ProviderProfile {
        ProviderProfile {
            provider: provider.to_string(),
            provider_id: id.to_string(),
            email: email.to_string(),
            username: "octocat".to_string(),
            first_name: "Octo".to_string(),
            last_name: "Cat".to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_login_creates_then_reuses_account() {
        let accounts = MemoryAccounts::new();
        assert!(accounts.is_empty().await);

        let first = accounts
            .login_with_provider("product", &profile("github", "1", "octo@example.com"))
            .await
            .unwrap();
        let second = accounts
            .login_with_provider("product", &profile("github", "1", "new@example.com"))
            .await
            .unwrap();

        assert_eq!(accounts.len().await, 1);
        assert_eq!(first.account, second.account);
        assert_eq!(second.email, "new@example.com");
        assert_eq!(second.product_id, "product");
        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn test_same_id_different_provider_is_distinct() {
        let accounts = MemoryAccounts::new();
        let github = accounts
            .login_with_provider("", &profile("github", "1", "a@example.com"))
            .await
            .unwrap();
        let google = accounts
            .login_with_provider("", &profile("google", "1", "a@example.com"))
            .await
            .unwrap();

        assert_ne!(github.account, google.account);
        assert_eq!(accounts.len().await, 2);
    }

    #[tokio::test]
    async fn test_login_requires_email() {
        let accounts = MemoryAccounts::new();
        let err = accounts
            .login_with_provider("", &profile("github", "1", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::MissingEmail { .. }));
        assert!(accounts.is_empty().await);
    }
}
