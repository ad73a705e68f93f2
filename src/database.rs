use std::time::Duration;

use anyhow::Context;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Create a connection pool. Connections are opened on first use.
pub fn connect(options: PgConnectOptions) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options)
}

/// Apply any pending schema migrations
#[tracing::instrument(name = "Run database migrations", skip(pool))]
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}
