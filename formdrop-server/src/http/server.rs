//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS (any origin, method and header)
//! - Tracing middleware
//! - Schema initialization in the background after bind
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::schema;
use crate::uploads::UploadDir;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Directory for uploaded images (default: ./uploads)
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub uploads: UploadDir,
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let static_files = routes::files::serve_dir(&state.uploads);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::submissions::router())
        .merge(routes::files::router(&state.uploads))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// Fails only if the upload directory cannot be created or the address
/// cannot be bound. Database problems are logged and surface per request.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::default())?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let uploads = UploadDir::new(&config.upload_dir);
    uploads
        .ensure_exists()
        .await
        .map_err(|source| ServerError::UploadDir {
            path: config.upload_dir.clone(),
            source,
        })?;

    let state = AppState {
        pool: pool.clone(),
        uploads,
    };
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    tokio::spawn(async move { schema::init(&pool).await });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot create upload directory {}: {source}", .path.display())]
    UploadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
