//! Call-scoped deadlines for store and lookup operations.
//!
//! Services wrap every repository call and every external lookup in
//! [`within`], so a stalled dependency surfaces as [`DeadlineExceeded`]
//! instead of holding the request open.

use std::{future::Future, time::Duration};
use thiserror::Error;

/// Default budget for a single store or lookup call.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(2);

/// An operation did not finish within its budget.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{operation} did not complete within {budget:?}")]
pub struct DeadlineExceeded {
    /// Name of the timed-out operation.
    pub operation: &'static str,
    /// Budget that was exceeded.
    pub budget: Duration,
}

/// Runs `future` to completion or fails once `budget` elapses.
///
/// # Errors
///
/// Returns [`DeadlineExceeded`] when the future is still pending after
/// `budget`. The future is dropped at that point.
pub async fn within<F>(
    budget: Duration,
    operation: &'static str,
    future: F,
) -> Result<F::Output, DeadlineExceeded>
where
    F: Future,
{
    tokio::time::timeout(budget, future)
        .await
        .map_err(|_elapsed| DeadlineExceeded { operation, budget })
}
