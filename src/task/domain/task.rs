//! Task aggregate root and lifecycle state.

use super::{TaskDescription, TaskDomainError, TaskId};
use crate::user::domain::UserId;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle state, derived from the end timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// No end timestamp yet; the task is still accruing time.
    Open,
    /// The task has ended; its duration is fixed.
    Closed,
}

/// Unit of work tracked for a user.
///
/// `start_time` never changes after creation. `end_time` is set at most once
/// and is never earlier than `start_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    description: TaskDescription,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning user.
    pub user_id: UserId,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted start timestamp.
    pub start_time: DateTime<Utc>,
    /// Persisted end timestamp, if the task has ended.
    pub end_time: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            description: data.description,
            start_time: data.start_time,
            end_time: data.end_time,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the start timestamp.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns the end timestamp, if the task has ended.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        if self.end_time.is_some() {
            TaskState::Closed
        } else {
            TaskState::Open
        }
    }

    /// Returns `true` once the task has ended.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Ends the task at the current clock time.
    ///
    /// A clock reading earlier than the start timestamp is clamped to the
    /// start, so the resulting duration is never negative. Returns the
    /// recorded end timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyEnded`] when the task is closed.
    pub fn close(&mut self, clock: &impl Clock) -> Result<DateTime<Utc>, TaskDomainError> {
        self.close_at(clock.utc())
    }

    /// Ends the task at `end`, clamped to the start timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyEnded`] when the task is closed.
    pub fn close_at(&mut self, end: DateTime<Utc>) -> Result<DateTime<Utc>, TaskDomainError> {
        if self.is_closed() {
            return Err(TaskDomainError::AlreadyEnded(self.id));
        }
        let clamped = end.max(self.start_time);
        self.end_time = Some(clamped);
        self.updated_at = clamped;
        Ok(clamped)
    }

    /// Returns the time spent on the task as of `now`.
    ///
    /// Closed tasks report `end - start`. Open tasks report `now - start`,
    /// never less than zero.
    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> TimeDelta {
        let until = self.end_time.unwrap_or(now);
        (until - self.start_time).max(TimeDelta::zero())
    }
}

/// Task awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    user_id: UserId,
    description: TaskDescription,
    start_time: DateTime<Utc>,
}

impl NewTask {
    /// Starts a task for a user at the current clock time.
    #[must_use]
    pub fn start(user_id: UserId, description: TaskDescription, clock: &impl Clock) -> Self {
        Self {
            user_id,
            description,
            start_time: clock.utc(),
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the start timestamp, also used for both audit timestamps.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Assigns the store identifier, producing an open task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            user_id: self.user_id,
            description: self.description,
            start_time: self.start_time,
            end_time: None,
            created_at: self.start_time,
            updated_at: self.start_time,
        }
    }
}
