use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS saved_campaigns (
    id UUID PRIMARY KEY,
    campaign_name TEXT NOT NULL,
    brand TEXT NOT NULL,
    industry TEXT NOT NULL,
    favorite BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    campaign JSONB NOT NULL
);
DROP INDEX IF EXISTS saved_campaigns_name_brand_idx;
CREATE UNIQUE INDEX IF NOT EXISTS saved_campaigns_name_brand_key
    ON saved_campaigns (campaign_name, brand);
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the library table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    pool.execute(SCHEMA).await?;
    info!("Library schema ready");
    Ok(())
}
