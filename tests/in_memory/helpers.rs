//! Service fixtures over a shared in-memory store.

use crate::test_helpers::{ManualClock, base_time, directory};
use rstest::fixture;
use std::sync::Arc;
use timetrack::{
    store::memory::InMemoryStore,
    task::services::TaskLifecycleService,
    user::{adapters::memory::StaticProfileDirectory, services::UserRegistryService},
};

/// User service used by the in-memory tests.
pub type Users = UserRegistryService<InMemoryStore, StaticProfileDirectory, ManualClock>;

/// Task service used by the in-memory tests.
pub type Tasks = TaskLifecycleService<InMemoryStore, ManualClock>;

/// Both services over one store and one clock.
pub struct Services {
    pub store: Arc<InMemoryStore>,
    pub clock: ManualClock,
    pub users: Users,
    pub tasks: Tasks,
}

/// Provides fresh services for each test.
#[fixture]
pub fn services() -> Services {
    let store = Arc::new(InMemoryStore::new());
    let clock = ManualClock::starting_at(base_time());
    let users = UserRegistryService::new(
        Arc::clone(&store),
        Arc::new(directory()),
        Arc::new(clock.clone()),
    );
    let tasks = TaskLifecycleService::new(Arc::clone(&store), Arc::new(clock.clone()));
    Services {
        store,
        clock,
        users,
        tasks,
    }
}
