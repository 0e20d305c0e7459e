//! Error types for task domain validation.

use super::TaskId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or transitioning task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task id {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The task already has an end timestamp.
    #[error("task {0} has already ended")]
    AlreadyEnded(TaskId),

    /// The report period starts after it ends.
    #[error("period start {start} is after period end {end}")]
    InvalidPeriod {
        /// Requested period start.
        start: DateTime<Utc>,
        /// Requested period end.
        end: DateTime<Utc>,
    },
}

/// Error returned while parsing a description uniqueness policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown description uniqueness policy: {0}")]
pub struct ParseDescriptionUniquenessError(pub String);
