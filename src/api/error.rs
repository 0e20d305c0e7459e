//! HTTP error responses.
//!
//! Every service error is mapped by variant to a status code and a stable
//! message. Internal details are logged and never returned to the caller.

use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::TaskLifecycleError};
use crate::user::{
    ports::{ProfileLookupError, UserRepositoryError},
    services::UserRegistryError,
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

const INTERNAL_MESSAGE: &str = "internal server error";
const TIMEOUT_MESSAGE: &str = "operation timed out";

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// HTTP error with its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error response.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict response.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 response, logging the hidden cause.
    #[must_use]
    pub fn internal(cause: &dyn std::error::Error) -> Self {
        error!(error = %cause, "request failed with internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    /// Creates a 504 Gateway Timeout response.
    #[must_use]
    pub fn timeout(cause: &dyn std::error::Error) -> Self {
        error!(error = %cause, "request failed with timeout");
        Self::new(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        if self.status.is_client_error() {
            debug!(status = %self.status, message = %self.message, "request rejected");
        }
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<UserRegistryError> for ApiError {
    fn from(err: UserRegistryError) -> Self {
        match err {
            UserRegistryError::Domain(domain) => Self::bad_request(domain.to_string()),
            UserRegistryError::ProfileLookup(ProfileLookupError::Timeout) => {
                Self::timeout(&ProfileLookupError::Timeout)
            }
            UserRegistryError::ProfileLookup(lookup) => {
                error!(error = %lookup, "identity profile lookup failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to resolve identity profile",
                )
            }
            UserRegistryError::Repository(UserRepositoryError::DuplicatePassport(_)) => {
                Self::conflict("user with this passport already exists")
            }
            UserRegistryError::Repository(UserRepositoryError::NotFound(_)) => {
                Self::not_found("user not found")
            }
            UserRegistryError::Repository(repository @ UserRepositoryError::Persistence(_)) => {
                Self::internal(&repository)
            }
            UserRegistryError::Timeout(deadline) => Self::timeout(&deadline),
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(TaskDomainError::AlreadyEnded(_))
            | TaskLifecycleError::Repository(TaskRepositoryError::AlreadyEnded(_)) => {
                Self::conflict("task already ended")
            }
            TaskLifecycleError::Domain(domain) => Self::bad_request(domain.to_string()),
            TaskLifecycleError::User(user) => Self::bad_request(user.to_string()),
            TaskLifecycleError::Repository(TaskRepositoryError::UnknownUser(_)) => {
                Self::bad_request("user not found")
            }
            TaskLifecycleError::Repository(TaskRepositoryError::DuplicateOpenTask { .. }) => {
                Self::conflict("an open task with this name already exists")
            }
            TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)) => {
                Self::not_found("task not found")
            }
            TaskLifecycleError::Repository(repository @ TaskRepositoryError::Persistence(_)) => {
                Self::internal(&repository)
            }
            TaskLifecycleError::Timeout(deadline) => Self::timeout(&deadline),
            TaskLifecycleError::NoTasks(_) => Self::new(StatusCode::NO_CONTENT, "no tasks found"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
