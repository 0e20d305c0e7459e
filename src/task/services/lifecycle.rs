//! Service layer for task start/end transitions and period reporting.

use crate::deadline::{DEFAULT_OPERATION_TIMEOUT, DeadlineExceeded, within};
use crate::task::{
    domain::{
        DescriptionUniqueness, NewTask, ReportPeriod, Task, TaskDescription, TaskDomainError,
        TaskId, TaskSummary, rank_by_elapsed,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for starting a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTaskRequest {
    user_id: i64,
    description: String,
}

impl StartTaskRequest {
    /// Creates a request for the given user and description.
    #[must_use]
    pub fn new(user_id: i64, description: impl Into<String>) -> Self {
        Self {
            user_id,
            description: description.into(),
        }
    }
}

/// Parameters of a period report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodQuery {
    user_id: i64,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl PeriodQuery {
    /// Creates an unbounded query for a user.
    #[must_use]
    pub const fn new(user_id: i64) -> Self {
        Self {
            user_id,
            start: None,
            end: None,
        }
    }

    /// Sets the inclusive lower bound on task start times.
    #[must_use]
    pub const fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the inclusive upper bound on task end times.
    #[must_use]
    pub const fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Task validation or transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The user identifier is invalid.
    #[error(transparent)]
    User(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// A store call exceeded the operation deadline.
    #[error(transparent)]
    Timeout(#[from] DeadlineExceeded),
    /// The user has no tasks in the requested period.
    #[error("no tasks found for user {0} in the requested period")]
    NoTasks(UserId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle and reporting orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    uniqueness: DescriptionUniqueness,
    operation_timeout: Duration,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a task lifecycle service with default policy and deadline.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            uniqueness: DescriptionUniqueness::WhileOpen,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Sets the duplicate description policy for new tasks.
    #[must_use]
    pub const fn with_uniqueness(mut self, uniqueness: DescriptionUniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    /// Overrides the deadline applied to each store call.
    #[must_use]
    pub const fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Starts a task for a user at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::User`] or [`TaskLifecycleError::Domain`]
    /// for invalid input, and [`TaskLifecycleError::Repository`] when the
    /// user does not exist or already has an open task with the same
    /// description.
    pub async fn start(&self, request: StartTaskRequest) -> TaskLifecycleResult<Task> {
        let user_id = UserId::new(request.user_id)?;
        let description = TaskDescription::new(request.description)?;
        let new_task = NewTask::start(user_id, description, &*self.clock);

        let task = within(
            self.operation_timeout,
            "start task",
            self.repository.start(&new_task, self.uniqueness),
        )
        .await?
        .inspect_err(|err| warn!(user_id = %user_id, error = %err, "task start rejected"))?;
        info!(user_id = %user_id, task_id = %task.id(), "started task");
        Ok(task)
    }

    /// Ends an open task at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist, and
    /// [`TaskLifecycleError::Domain`] with [`TaskDomainError::AlreadyEnded`]
    /// when it has already ended. A close that loses a race with another
    /// close surfaces as [`TaskRepositoryError::AlreadyEnded`].
    pub async fn end(&self, task_id: i64) -> TaskLifecycleResult<Task> {
        let id = TaskId::new(task_id)?;
        let mut task = within(
            self.operation_timeout,
            "find task",
            self.repository.find_by_id(id),
        )
        .await??
        .ok_or(TaskRepositoryError::NotFound(id))
        .inspect_err(|_| debug!(task_id = %id, "end requested for missing task"))?;

        let end_time = task
            .close(&*self.clock)
            .inspect_err(|err| warn!(task_id = %id, error = %err, "task end rejected"))?;

        let closed = within(
            self.operation_timeout,
            "end task",
            self.repository.close(id, end_time),
        )
        .await?
        .inspect_err(|err| warn!(task_id = %id, error = %err, "task end not persisted"))?;
        info!(task_id = %id, user_id = %closed.user_id(), "ended task");
        Ok(closed)
    }

    /// Finds a task by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the identifier is not
    /// positive, or a repository or timeout error when the lookup fails.
    pub async fn find_by_id(&self, task_id: i64) -> TaskLifecycleResult<Option<Task>> {
        let id = TaskId::new(task_id)?;
        Ok(within(
            self.operation_timeout,
            "find task",
            self.repository.find_by_id(id),
        )
        .await??)
    }

    /// Reports the user's tasks in a period, longest first.
    ///
    /// Open tasks are measured up to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] with
    /// [`TaskDomainError::InvalidPeriod`] when the period starts after it
    /// ends, and [`TaskLifecycleError::NoTasks`] when nothing matches.
    pub async fn report_period(&self, query: PeriodQuery) -> TaskLifecycleResult<Vec<TaskSummary>> {
        let user_id = UserId::new(query.user_id)?;
        let now = self.clock.utc();
        let period = ReportPeriod::resolve(query.start, query.end, now)?;

        let tasks = within(
            self.operation_timeout,
            "report tasks",
            self.repository.find_in_period(user_id, &period),
        )
        .await??;
        if tasks.is_empty() {
            debug!(user_id = %user_id, "no tasks in requested period");
            return Err(TaskLifecycleError::NoTasks(user_id));
        }
        Ok(rank_by_elapsed(&tasks, now))
    }
}
