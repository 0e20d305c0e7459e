//! Application services for task tracking.

mod lifecycle;

pub use lifecycle::{
    PeriodQuery, StartTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
