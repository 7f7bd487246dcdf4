//! PostgreSQL persistence for slangdex.
//!
//! - [`repositories`] -- zero-sized `Repo` structs with one async method per query.
//! - [`store::PgStore`] -- the `slangdex-core` store traits on top of the repositories.
//! - [`seed`] -- optional demo content for local development.

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

use slangdex_core::error::CoreError;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations embedded at compile time.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Convert a sqlx failure into the domain's storage error.
///
/// The underlying error is logged here; callers only see a sanitized kind.
pub(crate) fn storage_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(operation, error = %err, "Database operation failed");
        CoreError::Storage(format!("{operation} failed"))
    }
}
