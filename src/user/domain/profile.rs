//! Identity profile resolved from a passport.

use super::{UserDomainError, UserPatch};

/// Full identity record attached to a user.
///
/// Surname, name and address are mandatory. The patronymic is optional and a
/// blank patronymic is stored as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    surname: String,
    name: String,
    patronymic: Option<String>,
    address: String,
}

impl Profile {
    /// Creates a validated profile. All values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::BlankField`] naming the first of surname,
    /// name or address that is empty after trimming.
    pub fn new(
        surname: impl Into<String>,
        name: impl Into<String>,
        patronymic: Option<String>,
        address: impl Into<String>,
    ) -> Result<Self, UserDomainError> {
        Ok(Self {
            surname: required("surname", &surname.into())?,
            name: required("name", &name.into())?,
            patronymic: optional(patronymic),
            address: required("address", &address.into())?,
        })
    }

    /// Returns the surname.
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Returns the given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the patronymic, if any.
    #[must_use]
    pub fn patronymic(&self) -> Option<&str> {
        self.patronymic.as_deref()
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Overwrites the fields set in the patch. Patch values are already
    /// validated.
    pub(super) fn apply(&mut self, patch: &UserPatch) {
        if let Some(surname) = patch.surname() {
            surname.clone_into(&mut self.surname);
        }
        if let Some(name) = patch.name() {
            name.clone_into(&mut self.name);
        }
        if let Some(patronymic) = patch.patronymic() {
            self.patronymic = patronymic.map(str::to_owned);
        }
        if let Some(address) = patch.address() {
            address.clone_into(&mut self.address);
        }
    }
}

/// Trims a mandatory field, rejecting blank values.
pub(super) fn required(field: &'static str, value: &str) -> Result<String, UserDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserDomainError::BlankField(field));
    }
    Ok(trimmed.to_owned())
}

/// Trims an optional field, collapsing blank values to `None`.
pub(super) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
