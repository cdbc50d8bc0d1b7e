//! Create the submissions table and exit

use anyhow::{Context, Result};
use clap::Parser;

use formdrop_server::db::schema::ensure_schema;
use formdrop_server::db::{create_pool, DatabaseConfig};

use crate::config::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the schema step on its own; unlike `serve`, failure is fatal here.
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let db = DatabaseConfig::from(args.database);
    let pool = create_pool(&db).context("Invalid database configuration")?;

    ensure_schema(&pool)
        .await
        .context("Failed to initialize database")?;

    tracing::info!("Database initialized");
    pool.close().await;
    Ok(())
}
