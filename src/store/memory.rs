//! In-memory store implementing the user and task repository ports.

use crate::task::{
    domain::{DescriptionUniqueness, NewTask, ReportPeriod, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::{
    domain::{NewUser, Page, Passport, User, UserFilter, UserId, UserPatch},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// The store lock was poisoned by a panicking writer.
#[derive(Debug, Clone, Copy, Error)]
#[error("in-memory store lock poisoned")]
pub struct StorePoisoned;

/// Thread-safe in-memory store for users and their tasks.
///
/// Identifiers are assigned sequentially from 1. Removing a user removes the
/// user's tasks in the same critical section.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    passport_index: HashMap<Passport, UserId>,
    tasks: BTreeMap<TaskId, Task>,
    last_user_id: i64,
    last_task_id: i64,
}

impl StoreState {
    const fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::from_persisted(self.last_user_id)
    }

    const fn next_task_id(&mut self) -> TaskId {
        self.last_task_id += 1;
        TaskId::from_persisted(self.last_task_id)
    }

    fn has_open_task(&self, user_id: UserId, description: &str) -> bool {
        self.tasks.values().any(|task| {
            task.user_id() == user_id
                && !task.is_closed()
                && task.description().as_str() == description
        })
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks across all users.
    ///
    /// # Errors
    ///
    /// Returns [`StorePoisoned`] when the lock is poisoned.
    pub fn task_count(&self) -> Result<usize, StorePoisoned> {
        Ok(self.read()?.tasks.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StorePoisoned> {
        self.state.read().map_err(|_poisoned| StorePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StorePoisoned> {
        self.state.write().map_err(|_poisoned| StorePoisoned)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        if state.passport_index.contains_key(user.passport()) {
            return Err(UserRepositoryError::DuplicatePassport(
                user.passport().clone(),
            ));
        }

        let id = state.next_user_id();
        let created = user.clone().into_user(id);
        state.passport_index.insert(created.passport().clone(), id);
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self, filter: &UserFilter, page: Page) -> UserRepositoryResult<Vec<User>> {
        let skip = usize::try_from(page.offset()).map_err(UserRepositoryError::persistence)?;
        let take = usize::try_from(page.limit()).map_err(UserRepositoryError::persistence)?;
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state
            .users
            .values()
            .filter(|user| filter.matches(user))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<User> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        let old_passport = state
            .users
            .get(&id)
            .ok_or(UserRepositoryError::NotFound(id))?
            .passport()
            .clone();

        if let Some(passport) = patch.passport()
            && let Some(&holder) = state.passport_index.get(passport)
            && holder != id
        {
            return Err(UserRepositoryError::DuplicatePassport(passport.clone()));
        }

        let user = state
            .users
            .get_mut(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        user.apply(patch, updated_at);
        let updated = user.clone();

        if *updated.passport() != old_passport {
            state.passport_index.remove(&old_passport);
            state.passport_index.insert(updated.passport().clone(), id);
        }
        Ok(updated)
    }

    async fn remove(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        let removed = state
            .users
            .remove(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        state.passport_index.remove(removed.passport());
        state.tasks.retain(|_, task| task.user_id() != id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn start(
        &self,
        task: &NewTask,
        uniqueness: DescriptionUniqueness,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let user_id = task.user_id();
        if !state.users.contains_key(&user_id) {
            return Err(TaskRepositoryError::UnknownUser(user_id));
        }
        let description = task.description().as_str();
        if uniqueness.is_enforced() && state.has_open_task(user_id, description) {
            return Err(TaskRepositoryError::DuplicateOpenTask {
                user_id,
                description: description.to_owned(),
            });
        }

        let id = state.next_task_id();
        let started = task.clone().into_task(id);
        state.tasks.insert(id, started.clone());
        Ok(started)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn close(&self, id: TaskId, end_time: DateTime<Utc>) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.close_at(end_time)
            .map_err(|_already_ended| TaskRepositoryError::AlreadyEnded(id))?;
        Ok(task.clone())
    }

    async fn find_in_period(
        &self,
        user_id: UserId,
        period: &ReportPeriod,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.user_id() == user_id && period.contains(task))
            .cloned()
            .collect())
    }
}
