use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{generate_token, require_email, Accounts, LoginInfo, ProviderProfile};
use crate::error::AccountsError;

/// Account store backed by the `accounts` table.
#[derive(Clone, Debug)]
pub struct PgAccounts {
    pool: PgPool,
}

impl PgAccounts {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Accounts for PgAccounts {
    async fn login_with_provider(
        &self,
        product_id: &str,
        profile: &ProviderProfile,
    ) -> Result<LoginInfo, AccountsError> {
        require_email(profile)?;
        let token = generate_token();

        // Returning users get their profile refreshed and a new token
        let (id, email): (Uuid, String) = sqlx::query_as(
            r#"
            INSERT INTO accounts
                (email, first_name, last_name, avatar_url, provider, provider_id, product_id, last_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (provider, provider_id)
            DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                avatar_url = EXCLUDED.avatar_url,
                product_id = EXCLUDED.product_id,
                last_token = EXCLUDED.last_token,
                updated_at = NOW()
            RETURNING id, email
            "#,
        )
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.avatar_url)
        .bind(&profile.provider)
        .bind(&profile.provider_id)
        .bind(product_id)
        .bind(&token)
        .fetch_one(&self.pool)
        .await?;

        Ok(LoginInfo {
            account: id.to_string(),
            email,
            token,
            product_id: product_id.to_string(),
        })
    }
}
