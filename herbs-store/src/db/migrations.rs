//! Schema bootstrap for the herbs table

use sqlx::PgPool;

use crate::error::{Result, StoreError};

/// Create the `herbs` table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running herbs migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS herbs (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            latin_name VARCHAR(255),
            description TEXT,
            is_poisonous BOOLEAN NOT NULL DEFAULT FALSE,
            image_path VARCHAR(500),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::database("failed to create herbs table", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS herbs_name_idx ON herbs (name)")
        .execute(pool)
        .await
        .map_err(|e| StoreError::database("failed to create herbs name index", e))?;

    tracing::info!("herbs migrations complete");
    Ok(())
}
