//! Domain model for task tracking.
//!
//! Tasks are start/end intervals owned by a user. The domain covers the
//! open/closed lifecycle, elapsed-time computation and period reporting,
//! keeping persistence and transport outside of the boundary.

mod error;
mod ids;
mod report;
mod task;
mod uniqueness;

pub use error::{ParseDescriptionUniquenessError, TaskDomainError};
pub use ids::{TaskDescription, TaskId};
pub use report::{ReportPeriod, TaskSummary, rank_by_elapsed};
pub use task::{NewTask, PersistedTaskData, Task, TaskState};
pub use uniqueness::DescriptionUniqueness;
