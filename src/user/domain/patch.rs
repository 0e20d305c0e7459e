//! Partial user updates.

use super::{
    Passport, UserDomainError,
    profile::{optional, required},
};

/// Set of user fields to change in a single update.
///
/// Each field is applied only when present. The fields form the complete
/// allow-list of updatable columns; the identifier and timestamps are never
/// patchable. A patronymic of `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    passport: Option<Passport>,
    surname: Option<String>,
    name: Option<String>,
    patronymic: Option<Option<String>>,
    address: Option<String>,
}

impl UserPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the passport.
    #[must_use]
    pub fn with_passport(mut self, passport: Passport) -> Self {
        self.passport = Some(passport);
        self
    }

    /// Replaces the surname.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::BlankField`] when the value is blank.
    pub fn with_surname(mut self, surname: impl Into<String>) -> Result<Self, UserDomainError> {
        self.surname = Some(required("surname", &surname.into())?);
        Ok(self)
    }

    /// Replaces the given name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::BlankField`] when the value is blank.
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, UserDomainError> {
        self.name = Some(required("name", &name.into())?);
        Ok(self)
    }

    /// Replaces the patronymic. A blank value clears it.
    #[must_use]
    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        self.patronymic = Some(optional(Some(patronymic.into())));
        self
    }

    /// Replaces the address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::BlankField`] when the value is blank.
    pub fn with_address(mut self, address: impl Into<String>) -> Result<Self, UserDomainError> {
        self.address = Some(required("address", &address.into())?);
        Ok(self)
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.passport.is_none()
            && self.surname.is_none()
            && self.name.is_none()
            && self.patronymic.is_none()
            && self.address.is_none()
    }

    /// Returns the new passport, if set.
    #[must_use]
    pub const fn passport(&self) -> Option<&Passport> {
        self.passport.as_ref()
    }

    /// Returns the new surname, if set.
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    /// Returns the new given name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the patronymic change: `None` leaves it untouched,
    /// `Some(None)` clears it.
    #[must_use]
    pub fn patronymic(&self) -> Option<Option<&str>> {
        self.patronymic.as_ref().map(Option::as_deref)
    }

    /// Returns the new address, if set.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}
