//! In-memory profile directory.

use crate::user::{
    domain::{Passport, Profile},
    ports::{ProfileFetcher, ProfileLookupError},
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Fixed passport-to-profile directory.
///
/// Unknown passports answer like a remote lookup that returned
/// `404 Not Found`. A directory built with [`StaticProfileDirectory::failing`]
/// answers every lookup with the configured error.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileDirectory {
    profiles: HashMap<Passport, Profile>,
    failure: Option<ProfileLookupError>,
}

impl StaticProfileDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory that fails every lookup with `error`.
    #[must_use]
    pub fn failing(error: ProfileLookupError) -> Self {
        Self {
            profiles: HashMap::new(),
            failure: Some(error),
        }
    }

    /// Registers a profile for a passport.
    #[must_use]
    pub fn with_profile(mut self, passport: Passport, profile: Profile) -> Self {
        self.profiles.insert(passport, profile);
        self
    }
}

#[async_trait]
impl ProfileFetcher for StaticProfileDirectory {
    async fn fetch(&self, passport: &Passport) -> Result<Profile, ProfileLookupError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.profiles
            .get(passport)
            .cloned()
            .ok_or(ProfileLookupError::UnexpectedStatus(404))
    }
}
