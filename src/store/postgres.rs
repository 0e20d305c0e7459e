//! `PostgreSQL` connection pool and schema bootstrap.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

/// `PostgreSQL` connection pool shared by the user and task adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the `users` and `tasks` tables.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-16-000000_create_users_and_tasks/up.sql");

/// Errors raised while preparing `PostgreSQL` storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection pool could not be built or yielded no connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// Applying the schema failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] diesel::result::Error),
    /// The blocking bootstrap task panicked or was cancelled.
    #[error("schema bootstrap task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`StoreError::Pool`] when the pool cannot open its initial
/// connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, StoreError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies [`SCHEMA_SQL`] on a pooled connection.
///
/// # Errors
///
/// Returns [`StoreError`] when no connection is available or the DDL fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), StoreError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
        let mut connection = shared.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await??;
    info!("database schema is up to date");
    Ok(())
}
