//! HTTP surface of the service.
//!
//! Handlers translate query strings and JSON bodies into service requests,
//! and service errors into status codes through [`error::ApiError`].

pub mod dto;
pub mod error;
pub mod tasks;
pub mod users;

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use crate::user::{
    ports::{ProfileFetcher, UserRepository},
    services::UserRegistryService,
};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::DefaultClock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// User registry service as wired into the HTTP layer.
pub type UserService = UserRegistryService<dyn UserRepository, dyn ProfileFetcher, DefaultClock>;

/// Task lifecycle service as wired into the HTTP layer.
pub type TaskService = TaskLifecycleService<dyn TaskRepository, DefaultClock>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// User registry.
    pub users: Arc<UserService>,
    /// Task lifecycle and reporting.
    pub tasks: Arc<TaskService>,
}

impl AppState {
    /// Bundles the services for the router.
    #[must_use]
    pub fn new(users: UserService, tasks: TaskService) -> Self {
        Self {
            users: Arc::new(users),
            tasks: Arc::new(tasks),
        }
    }
}

/// Builds the application router with request tracing.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/tasks", get(tasks::report_tasks).post(tasks::start_task))
        .route("/tasks/end", post(tasks::end_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
