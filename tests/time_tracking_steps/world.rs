//! Shared world state for time tracking BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use crate::test_helpers::{ManualClock, base_time, directory};
use rstest::fixture;
use timetrack::{
    store::memory::InMemoryStore,
    task::{
        domain::{Task, TaskId},
        services::{TaskLifecycleError, TaskLifecycleService},
    },
    user::{
        adapters::memory::StaticProfileDirectory,
        domain::User,
        services::{UserRegistryError, UserRegistryService},
    },
};

/// User service used by the BDD world.
pub type TestUserService = UserRegistryService<InMemoryStore, StaticProfileDirectory, ManualClock>;

/// Task service used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryStore, ManualClock>;

/// Scenario world for time tracking behaviour tests.
pub struct TrackingWorld {
    pub clock: ManualClock,
    pub users: TestUserService,
    pub tasks: TestTaskService,
    pub current_user: Option<User>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_registration: Option<Result<User, UserRegistryError>>,
    pub last_start: Option<Result<Task, TaskLifecycleError>>,
    pub last_end: Option<Result<Task, TaskLifecycleError>>,
}

impl TrackingWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = ManualClock::starting_at(base_time());
        let users = UserRegistryService::new(
            Arc::clone(&store),
            Arc::new(directory()),
            Arc::new(clock.clone()),
        );
        let tasks = TaskLifecycleService::new(store, Arc::new(clock.clone()));

        Self {
            clock,
            users,
            tasks,
            current_user: None,
            task_ids: HashMap::new(),
            last_registration: None,
            last_start: None,
            last_end: None,
        }
    }

    /// Returns the registered user of the scenario.
    pub fn user(&self) -> Result<&User, eyre::Report> {
        self.current_user
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing registered user in scenario world"))
    }

    /// Returns the identifier of a task started in the scenario.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("task {name} was never started"))
    }
}

impl Default for TrackingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TrackingWorld {
    TrackingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
