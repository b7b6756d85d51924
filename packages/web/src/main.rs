//! Accounts auth server: social sign-in routes behind a session layer.

use std::sync::Arc;

use anyhow::Context as _;
use api::{register_providers, MemoryAccounts, PgAccounts, Registration, Settings};
use axum::Router;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads `.env` too, so it has to run before `LOG_LEVEL` is looked at.
    let settings = Settings::load().context("Failed to load settings")?;
    logging::init_logging()?;

    let registration = build(Router::new(), &settings).await?;

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.listen_addr))?;
    tracing::info!("Server listening on {}", settings.listen_addr);

    axum::serve(listener, registration.router.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}

/// Pick Postgres-backed stores when a database is configured, in-memory
/// ones otherwise, and register the auth providers on `router`.
async fn build(router: Router, settings: &Settings) -> anyhow::Result<Registration> {
    let Some(database_url) = settings.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, accounts and sessions are kept in memory");
        return Ok(register_providers(
            router,
            settings,
            Arc::new(MemoryAccounts::new()),
            MemoryStore::default(),
        ));
    };

    let pool = api::db::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    api::db::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;

    Ok(register_providers(
        router,
        settings,
        Arc::new(PgAccounts::new(pool)),
        session_store,
    ))
}
