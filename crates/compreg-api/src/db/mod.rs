//! # Database Persistence Layer
//!
//! Postgres persistence for company records via SQLx.
//!
//! The database is **optional**. When `DATABASE_URL` is set, records are
//! stored in the `companies` table through [`companies::PgCompanyStore`].
//! When absent, the service runs on the in-memory store and state does not
//! survive restarts.

pub mod companies;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the connection pool and run embedded migrations.
///
/// Returns `None` if no URL is configured (in-memory mode).
/// Returns `Err` if the URL is set but connecting or migrating fails.
pub async fn init_pool(
    url: Option<&str>,
    max_connections: u32,
) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(url) = url else {
        tracing::warn!(
            "DATABASE_URL not set, running with the in-memory store. \
             Records will not survive restarts."
        );
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!(max_connections, "Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
