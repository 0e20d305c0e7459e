//! Service layer for the user registry.
//!
//! Provides [`UserRegistryService`], which validates passports, resolves
//! identity profiles through the [`ProfileFetcher`] port, and coordinates
//! user persistence. Every port call runs under the configured operation
//! deadline.

use crate::deadline::{DEFAULT_OPERATION_TIMEOUT, DeadlineExceeded, within};
use crate::user::{
    domain::{NewUser, Page, Passport, User, UserDomainError, UserFilter, UserId, UserPatch},
    ports::{ProfileFetcher, ProfileLookupError, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    passport: String,
}

impl RegisterUserRequest {
    /// Creates a request from raw `"SSSS NNNNNN"` passport text.
    #[must_use]
    pub fn new(passport: impl Into<String>) -> Self {
        Self {
            passport: passport.into(),
        }
    }
}

/// Request payload for a partial user update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    passport: Option<String>,
    surname: Option<String>,
    name: Option<String>,
    patronymic: Option<String>,
    address: Option<String>,
}

impl UpdateUserRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement passport text.
    #[must_use]
    pub fn with_passport(mut self, passport: impl Into<String>) -> Self {
        self.passport = Some(passport.into());
        self
    }

    /// Sets the replacement surname.
    #[must_use]
    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    /// Sets the replacement given name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement patronymic; an empty value clears it.
    #[must_use]
    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        self.patronymic = Some(patronymic.into());
        self
    }

    /// Sets the replacement address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    fn into_patch(self) -> Result<UserPatch, UserDomainError> {
        let Self {
            passport,
            surname,
            name,
            patronymic,
            address,
        } = self;

        let mut patch = UserPatch::new();
        if let Some(raw) = passport {
            patch = patch.with_passport(Passport::parse(&raw)?);
        }
        if let Some(value) = surname {
            patch = patch.with_surname(value)?;
        }
        if let Some(value) = name {
            patch = patch.with_name(value)?;
        }
        if let Some(value) = patronymic {
            patch = patch.with_patronymic(value);
        }
        if let Some(value) = address {
            patch = patch.with_address(value)?;
        }
        if patch.is_empty() {
            return Err(UserDomainError::EmptyPatch);
        }
        Ok(patch)
    }
}

/// Service-level errors for user registry operations.
#[derive(Debug, Error)]
pub enum UserRegistryError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The identity profile could not be resolved.
    #[error(transparent)]
    ProfileLookup(#[from] ProfileLookupError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// A port call exceeded the operation deadline.
    #[error(transparent)]
    Timeout(#[from] DeadlineExceeded),
}

/// Result type for user registry service operations.
pub type UserRegistryResult<T> = Result<T, UserRegistryError>;

/// User registration, listing, update and removal service.
pub struct UserRegistryService<R, F, C>
where
    R: UserRepository + ?Sized,
    F: ProfileFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    profiles: Arc<F>,
    clock: Arc<C>,
    operation_timeout: Duration,
}

impl<R, F, C> UserRegistryService<R, F, C>
where
    R: UserRepository + ?Sized,
    F: ProfileFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a registry service with the default operation deadline.
    #[must_use]
    pub const fn new(repository: Arc<R>, profiles: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            repository,
            profiles,
            clock,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Overrides the deadline applied to each store call and profile lookup.
    #[must_use]
    pub const fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Registers a user from passport text.
    ///
    /// The passport is validated first, then the identity profile is
    /// resolved, and only then is the user persisted.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Domain`] for a malformed passport,
    /// [`UserRegistryError::ProfileLookup`] when the profile cannot be
    /// resolved, [`UserRegistryError::Repository`] when the passport is
    /// already registered or persistence fails, and
    /// [`UserRegistryError::Timeout`] when a call exceeds its deadline.
    pub async fn register(&self, request: RegisterUserRequest) -> UserRegistryResult<User> {
        let passport = Passport::parse(&request.passport).inspect_err(|err| {
            warn!(error = %err, "rejected passport");
        })?;

        let profile = within(
            self.operation_timeout,
            "profile lookup",
            self.profiles.fetch(&passport),
        )
        .await?
        .inspect_err(|err| warn!(passport = %passport, error = %err, "profile lookup failed"))?;

        let new_user = NewUser::new(passport, profile, &*self.clock);
        let user = within(
            self.operation_timeout,
            "create user",
            self.repository.create(&new_user),
        )
        .await?
        .inspect_err(|err| {
            warn!(passport = %new_user.passport(), error = %err, "user registration failed");
        })?;
        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Returns one page of users matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Repository`] when persistence fails or
    /// [`UserRegistryError::Timeout`] when the query exceeds its deadline.
    pub async fn list(&self, filter: &UserFilter, page: Page) -> UserRegistryResult<Vec<User>> {
        Ok(within(
            self.operation_timeout,
            "list users",
            self.repository.list(filter, page),
        )
        .await??)
    }

    /// Finds a user by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Domain`] when the identifier is not
    /// positive, or a repository or timeout error when the lookup fails.
    pub async fn find(&self, id: i64) -> UserRegistryResult<Option<User>> {
        let user_id = UserId::new(id)?;
        Ok(within(
            self.operation_timeout,
            "find user",
            self.repository.find_by_id(user_id),
        )
        .await??)
    }

    /// Applies a partial update to a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Domain`] for an invalid identifier, an
    /// empty request or an invalid field value, and
    /// [`UserRegistryError::Repository`] when the user does not exist or the
    /// new passport is already registered.
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> UserRegistryResult<User> {
        let user_id = UserId::new(id)?;
        let patch = request.into_patch()?;
        let user = within(
            self.operation_timeout,
            "update user",
            self.repository.update(user_id, &patch, self.clock.utc()),
        )
        .await?
        .inspect_err(|err| warn!(user_id = %user_id, error = %err, "user update failed"))?;
        info!(user_id = %user_id, "updated user");
        Ok(user)
    }

    /// Deletes a user and all of their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Domain`] for an invalid identifier and
    /// [`UserRegistryError::Repository`] when the user does not exist.
    pub async fn remove(&self, id: i64) -> UserRegistryResult<()> {
        let user_id = UserId::new(id)?;
        within(
            self.operation_timeout,
            "remove user",
            self.repository.remove(user_id),
        )
        .await?
        .inspect_err(|err| warn!(user_id = %user_id, error = %err, "user removal failed"))?;
        info!(user_id = %user_id, "removed user");
        Ok(())
    }
}
