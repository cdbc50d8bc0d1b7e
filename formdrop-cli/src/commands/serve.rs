//! HTTP server command
//!
//! Runs the submission API and serves the upload directory.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use formdrop_server::db::{create_pool, DatabaseConfig};
use formdrop_server::{run_server, ServerConfig};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory for uploaded images (also served as static files)
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        upload_dir: args.upload_dir,
    };
    let db = DatabaseConfig::from(args.database);

    tracing::info!(
        bind = %config.bind_addr,
        uploads = %config.upload_dir.display(),
        db_url_override = db.url.is_some(),
        "Starting formdrop server"
    );

    // Lazy pool: an unreachable database does not stop startup
    let pool = create_pool(&db).context("Invalid database configuration")?;

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
