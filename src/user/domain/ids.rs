//! Identifier type for users.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidUserId`] when the value is zero or
    /// negative.
    pub const fn new(value: i64) -> Result<Self, UserDomainError> {
        if value <= 0 {
            return Err(UserDomainError::InvalidUserId(value));
        }
        Ok(Self(value))
    }

    /// Wraps an identifier read back from storage.
    #[must_use]
    pub const fn from_persisted(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
