//! Repository port for task persistence, lifecycle transitions and period
//! lookup.

use crate::task::domain::{DescriptionUniqueness, NewTask, ReportPeriod, Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new open task and returns it with its assigned identifier.
    ///
    /// The uniqueness check and the insert happen atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::UnknownUser`] when the owning user does
    /// not exist, or [`TaskRepositoryError::DuplicateOpenTask`] when the
    /// policy is [`DescriptionUniqueness::WhileOpen`] and the user already
    /// has an open task with the same description.
    async fn start(
        &self,
        task: &NewTask,
        uniqueness: DescriptionUniqueness,
    ) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Sets the end timestamp of an open task and returns the closed task.
    ///
    /// The write only applies while the task is open, so two concurrent
    /// closes cannot both succeed. The stored end is clamped to the start.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::AlreadyEnded`] when it is already closed.
    async fn close(&self, id: TaskId, end_time: DateTime<Utc>) -> TaskRepositoryResult<Task>;

    /// Returns the user's tasks belonging to the period, ordered by
    /// identifier.
    async fn find_in_period(
        &self,
        user_id: UserId,
        period: &ReportPeriod,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The owning user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// The user already has an open task with the same description.
    #[error("user {user_id} already has an open task '{description}'")]
    DuplicateOpenTask {
        /// Owning user.
        user_id: UserId,
        /// Conflicting description.
        description: String,
    },

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task already has an end timestamp.
    #[error("task {0} has already ended")]
    AlreadyEnded(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
