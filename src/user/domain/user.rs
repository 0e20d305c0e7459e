//! User aggregate root.

use super::{Passport, Profile, UserId, UserPatch};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Registered person whose work time is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    passport: Passport,
    profile: Profile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted passport.
    pub passport: Passport,
    /// Persisted identity profile.
    pub profile: Profile,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            passport: data.passport,
            profile: data.profile,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the passport.
    #[must_use]
    pub const fn passport(&self) -> &Passport {
        &self.passport
    }

    /// Returns the identity profile.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a patch in place and stamps the modification time.
    pub fn apply(&mut self, patch: &UserPatch, updated_at: DateTime<Utc>) {
        if let Some(passport) = patch.passport() {
            self.passport = passport.clone();
        }
        self.profile.apply(patch);
        self.updated_at = updated_at;
    }
}

/// User awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    passport: Passport,
    profile: Profile,
    created_at: DateTime<Utc>,
}

impl NewUser {
    /// Prepares a user for insertion, stamped with the current clock time.
    #[must_use]
    pub fn new(passport: Passport, profile: Profile, clock: &impl Clock) -> Self {
        Self {
            passport,
            profile,
            created_at: clock.utc(),
        }
    }

    /// Returns the passport.
    #[must_use]
    pub const fn passport(&self) -> &Passport {
        &self.passport
    }

    /// Returns the identity profile.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the creation timestamp, also used as the initial
    /// modification timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Assigns the store identifier, producing the persisted user.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            passport: self.passport,
            profile: self.profile,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
