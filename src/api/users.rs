//! Handlers for the `/users` resource.

use super::{
    AppState,
    dto::{
        CreateUserBody, DeleteUserBody, ListUsersParams, MessageBody, UpdateUserBody,
        UserIdParams, UserResponse,
    },
    error::ApiError,
};
use crate::user::services::RegisterUserRequest;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// `GET /users`: one page of users matching the query filters.
///
/// Responds `204 No Content` when the page is empty.
///
/// # Errors
///
/// Returns `400` for malformed parameters and `500` when the store fails.
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListUsersParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let (filter, page) = params.into_query()?;
    let users = state.users.list(&filter, page).await?;
    if users.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(body).into_response())
}

/// `POST /users`: registers a user from a passport.
///
/// # Errors
///
/// Returns `400` for a malformed passport, `409` for a registered passport
/// and `500` when the identity profile cannot be resolved.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let Json(body) = payload?;
    let user = state
        .users
        .register(RegisterUserRequest::new(body.passport))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::new(format!("user {} created", user.id()))),
    ))
}

/// `PUT /users?id=ID`: applies a partial update.
///
/// # Errors
///
/// Returns `400` for a missing identifier or invalid fields, `404` when the
/// user does not exist and `409` when the new passport is taken.
pub async fn update_user(
    State(state): State<AppState>,
    query: Result<Query<UserIdParams>, QueryRejection>,
    payload: Result<Json<UpdateUserBody>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Query(params) = query?;
    let id = params.require_id()?;
    let Json(body) = payload?;
    state.users.update(id, body.into()).await?;
    Ok(Json(MessageBody::new(format!("user {id} updated"))))
}

/// `DELETE /users`: removes a user together with their tasks.
///
/// # Errors
///
/// Returns `400` for a malformed body and `404` when the user does not
/// exist.
pub async fn delete_user(
    State(state): State<AppState>,
    payload: Result<Json<DeleteUserBody>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(DeleteUserBody { id }) = payload?;
    state.users.remove(id).await?;
    Ok(Json(MessageBody::new(format!("user {id} deleted"))))
}
