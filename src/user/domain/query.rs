//! Filtering and pagination for user listings.

use super::{User, UserDomainError, UserId};

/// Default page size when the caller does not supply one.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Field filters for listing users.
///
/// The identifier is matched exactly; every text field matches when the
/// stored value contains the filter value. Unset fields match everything, so
/// an empty filter selects all users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Exact user identifier.
    pub id: Option<UserId>,
    /// Substring of the canonical `"SSSS NNNNNN"` passport.
    pub passport: Option<String>,
    /// Substring of the surname.
    pub surname: Option<String>,
    /// Substring of the given name.
    pub name: Option<String>,
    /// Substring of the patronymic; users without one never match.
    pub patronymic: Option<String>,
    /// Substring of the address.
    pub address: Option<String>,
}

impl UserFilter {
    /// Returns `true` when no filter field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.passport.is_none()
            && self.surname.is_none()
            && self.name.is_none()
            && self.patronymic.is_none()
            && self.address.is_none()
    }

    /// Evaluates the filter against a user.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let profile = user.profile();
        self.id.is_none_or(|id| id == user.id())
            && contains(
                Some(user.passport().to_string().as_str()),
                self.passport.as_deref(),
            )
            && contains(Some(profile.surname()), self.surname.as_deref())
            && contains(Some(profile.name()), self.name.as_deref())
            && contains(profile.patronymic(), self.patronymic.as_deref())
            && contains(Some(profile.address()), self.address.as_deref())
    }
}

fn contains(value: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(wanted) => value.is_some_and(|stored| stored.contains(wanted)),
    }
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Creates a validated page selection.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidPageNumber`] or
    /// [`UserDomainError::InvalidPageSize`] when either value is zero.
    pub const fn new(number: u32, size: u32) -> Result<Self, UserDomainError> {
        if number == 0 {
            return Err(UserDomainError::InvalidPageNumber);
        }
        if size == 0 {
            return Err(UserDomainError::InvalidPageSize);
        }
        Ok(Self { number, size })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns the number of rows per page.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the number of rows skipped before this page.
    #[must_use]
    pub fn offset(self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.size)
    }

    /// Returns the maximum number of rows on this page.
    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
