//! Port for resolving identity profiles from passport credentials.

use crate::user::domain::{Passport, Profile};
use async_trait::async_trait;
use thiserror::Error;

/// Source of identity profiles keyed by passport.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Resolves the profile registered for a passport.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileLookupError`] when the source is unreachable, answers
    /// with a non-success status, or returns an unusable profile.
    async fn fetch(&self, passport: &Passport) -> Result<Profile, ProfileLookupError>;
}

/// Errors raised while resolving a profile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileLookupError {
    /// The lookup did not answer in time.
    #[error("profile lookup timed out")]
    Timeout,

    /// The lookup could not be reached.
    #[error("profile lookup unreachable: {0}")]
    Connection(String),

    /// The lookup answered with a non-success status.
    #[error("profile lookup returned status {0}")]
    UnexpectedStatus(u16),

    /// The response body could not be decoded.
    #[error("malformed profile response: {0}")]
    MalformedBody(String),

    /// A mandatory profile field was missing or blank.
    #[error("profile lookup returned no {0}")]
    IncompleteProfile(&'static str),
}
