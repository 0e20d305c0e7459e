//! Service wiring from configuration.
//!
//! [`build_state`] selects the storage backend, prepares the identity
//! profile client and applies the operation deadline and description policy
//! to both services.

use crate::api::{AppState, TaskService, UserService};
use crate::config::{AppConfig, StorageMode};
use crate::store::{
    memory::InMemoryStore,
    postgres::{StoreError, apply_schema, build_pool},
};
use crate::task::{adapters::postgres::PostgresTaskRepository, ports::TaskRepository};
use crate::user::{
    adapters::{postgres::PostgresUserRepository, profile_api::HttpProfileFetcher},
    ports::{ProfileFetcher, UserRepository},
};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// `PostgreSQL` storage was selected without a connection URL.
    #[error("postgres storage selected without a database URL")]
    MissingDatabaseUrl,
    /// The pool or schema could not be prepared.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The identity profile HTTP client could not be built.
    #[error("failed to build profile client: {0}")]
    ProfileClient(#[from] reqwest::Error),
}

/// Builds the handler state described by `config`.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the storage backend or the profile client
/// cannot be prepared.
pub async fn build_state(config: &AppConfig) -> Result<AppState, BootstrapError> {
    let profiles: Arc<dyn ProfileFetcher> = Arc::new(HttpProfileFetcher::new(
        config.profile_api_url.as_str(),
        config.operation_timeout,
    )?);

    let (users, tasks) = match config.storage_mode {
        StorageMode::InMemory => {
            info!("using in-memory storage");
            let store = Arc::new(InMemoryStore::new());
            let users: Arc<dyn UserRepository> = store.clone();
            let tasks: Arc<dyn TaskRepository> = store;
            (users, tasks)
        }
        StorageMode::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(BootstrapError::MissingDatabaseUrl)?;
            let pool = build_pool(url, config.db_pool_size)?;
            if config.run_migrations {
                apply_schema(&pool).await?;
            }
            info!(pool_size = config.db_pool_size, "using postgres storage");
            let users: Arc<dyn UserRepository> =
                Arc::new(PostgresUserRepository::new(pool.clone()));
            let tasks: Arc<dyn TaskRepository> = Arc::new(PostgresTaskRepository::new(pool));
            (users, tasks)
        }
    };

    Ok(assemble(config, users, tasks, profiles))
}

/// Wires services over already-built ports.
#[must_use]
pub fn assemble(
    config: &AppConfig,
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
    profiles: Arc<dyn ProfileFetcher>,
) -> AppState {
    let clock = Arc::new(DefaultClock);
    let user_service = UserService::new(users, profiles, Arc::clone(&clock))
        .with_operation_timeout(config.operation_timeout);
    let task_service = TaskService::new(tasks, clock)
        .with_operation_timeout(config.operation_timeout)
        .with_uniqueness(config.description_uniqueness);
    AppState::new(user_service, task_service)
}
