//! Static file serving for uploaded images
//!
//! The upload directory is served read-only twice: at the web root as the
//! router fallback, and under `/uploads/` so stored image paths
//! (`uploads/<file>`) resolve as URLs directly.

use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::http::server::AppState;
use crate::uploads::{UploadDir, STORED_PREFIX};

/// File service over the upload directory.
pub fn serve_dir(uploads: &UploadDir) -> ServeDir {
    ServeDir::new(uploads.root())
}

/// Router serving `/uploads/*` from the upload directory
pub fn router(uploads: &UploadDir) -> Router<Arc<AppState>> {
    tracing::info!(path = %uploads.root().display(), "Serving uploaded files");

    Router::new().nest_service(&format!("/{}", STORED_PREFIX), serve_dir(uploads))
}
