//! Period reporting over a user's tasks.

use super::{Task, TaskDescription, TaskDomainError, TaskId};
use chrono::{DateTime, TimeDelta, Utc};

/// Closed time window for a task report.
///
/// A task belongs to the period when it started at or after `start` and has
/// either ended at or before `end` or is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReportPeriod {
    /// Resolves optional bounds into a period.
    ///
    /// A missing start means "since the beginning of time" and a missing end
    /// means `now`, or the start itself when the start lies in the future.
    /// Such a period selects no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPeriod`] when an explicit end is
    /// before the resolved start.
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        let period_start = start.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let period_end = end.unwrap_or_else(|| now.max(period_start));
        if period_start > period_end {
            return Err(TaskDomainError::InvalidPeriod {
                start: period_start,
                end: period_end,
            });
        }
        Ok(Self {
            start: period_start,
            end: period_end,
        })
    }

    /// Returns the inclusive lower bound on task start times.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the inclusive upper bound on task end times.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the lower bound, or `None` when the period is unbounded below.
    #[must_use]
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        (self.start != DateTime::<Utc>::MIN_UTC).then_some(self.start)
    }

    /// Evaluates period membership for a task.
    #[must_use]
    pub fn contains(&self, task: &Task) -> bool {
        task.start_time() >= self.start && task.end_time().is_none_or(|end| end <= self.end)
    }
}

/// One row of a period report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task description.
    pub description: TaskDescription,
    /// Time spent; live for open tasks.
    pub elapsed: TimeDelta,
    /// `true` when the task has ended.
    pub completed: bool,
}

impl TaskSummary {
    /// Summarises a task as of `now`.
    #[must_use]
    pub fn of(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id(),
            description: task.description().clone(),
            elapsed: task.elapsed_at(now),
            completed: task.is_closed(),
        }
    }

    /// Returns the elapsed time in whole minutes, rounded down.
    #[must_use]
    pub const fn elapsed_minutes(&self) -> i64 {
        self.elapsed.num_minutes()
    }
}

/// Summarises tasks and orders them by descending elapsed time.
///
/// Equal durations are ordered by ascending task identifier.
#[must_use]
pub fn rank_by_elapsed(tasks: &[Task], now: DateTime<Utc>) -> Vec<TaskSummary> {
    let mut summaries: Vec<TaskSummary> =
        tasks.iter().map(|task| TaskSummary::of(task, now)).collect();
    summaries.sort_by(|left, right| {
        right
            .elapsed
            .cmp(&left.elapsed)
            .then_with(|| left.id.cmp(&right.id))
    });
    summaries
}
