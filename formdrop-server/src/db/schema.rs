//! Table creation for the submissions store

use sqlx::PgPool;

use super::DbError;

/// Create the `submissions` table if it does not exist.
///
/// Safe to run on every startup; existing rows are untouched.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            message TEXT NOT NULL,
            image TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Startup hook: run [`ensure_schema`] and log the outcome.
///
/// Errors are logged, not returned. Requests will surface the underlying
/// problem when they first touch the database.
pub async fn init(pool: &PgPool) {
    match ensure_schema(pool).await {
        Ok(()) => tracing::info!("Database initialized"),
        Err(e) => tracing::error!(error = %e, "Failed to initialize database"),
    }
}
