//! Handlers for the `/tasks` resource.

use super::{
    AppState,
    dto::{EndTaskParams, MessageBody, StartTaskBody, TaskPeriodParams, TaskSummaryResponse},
    error::ApiError,
};
use crate::task::services::StartTaskRequest;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

/// `GET /tasks`: the user's tasks in a period, longest first.
///
/// # Errors
///
/// Returns `400` for malformed parameters or an inverted period and `204`
/// when the user has no tasks in the period.
pub async fn report_tasks(
    State(state): State<AppState>,
    query: Result<Query<TaskPeriodParams>, QueryRejection>,
) -> Result<Json<Vec<TaskSummaryResponse>>, ApiError> {
    let Query(params) = query?;
    let summaries = state.tasks.report_period(params.into_query()?).await?;
    Ok(Json(
        summaries.iter().map(TaskSummaryResponse::from).collect(),
    ))
}

/// `POST /tasks`: starts a task for a user.
///
/// # Errors
///
/// Returns `400` for an unknown user or blank name and `409` when an open
/// task with the same name exists.
pub async fn start_task(
    State(state): State<AppState>,
    payload: Result<Json<StartTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let Json(StartTaskBody { user_id, task_name }) = payload?;
    let task = state
        .tasks
        .start(StartTaskRequest::new(user_id, task_name))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::new(format!("task {} started", task.id()))),
    ))
}

/// `POST /tasks/end?taskId=ID`: ends an open task.
///
/// # Errors
///
/// Returns `400` for a malformed identifier, `404` when the task does not
/// exist and `409` when it has already ended.
pub async fn end_task(
    State(state): State<AppState>,
    query: Result<Query<EndTaskParams>, QueryRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Query(params) = query?;
    let task = state.tasks.end(params.require_task_id()?).await?;
    Ok(Json(MessageBody::new(format!("task {} ended", task.id()))))
}
