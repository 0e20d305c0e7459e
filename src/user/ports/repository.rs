//! Repository port for user persistence.

use crate::user::domain::{NewUser, Page, Passport, User, UserFilter, UserId, UserPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicatePassport`] when another user
    /// already holds the same passport.
    async fn create(&self, user: &NewUser) -> UserRepositoryResult<User>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Returns one page of users matching the filter, ordered by identifier.
    async fn list(&self, filter: &UserFilter, page: Page) -> UserRepositoryResult<Vec<User>>;

    /// Applies a partial update and returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist
    /// or [`UserRepositoryError::DuplicatePassport`] when the new passport is
    /// held by another user.
    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<User>;

    /// Deletes a user together with all of their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist.
    async fn remove(&self, id: UserId) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// Another user already holds the passport.
    #[error("user with passport {0} already exists")]
    DuplicatePassport(Passport),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
