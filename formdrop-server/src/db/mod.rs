//! Database layer - connection pool, schema and repositories
//!
//! - One process-wide `PgPool`, bounded (default 10 connections)
//! - The pool connects lazily; the server starts even if PostgreSQL is down
//! - No explicit transactions; each repo call is its own unit of work

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, DatabaseConfig};
pub use repos::*;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
