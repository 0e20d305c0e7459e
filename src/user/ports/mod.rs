//! Port contracts for the user registry.
//!
//! Ports define infrastructure-agnostic interfaces used by the registry
//! service: persistence of user records and lookup of identity profiles.

pub mod profile;
pub mod repository;

pub use profile::{ProfileFetcher, ProfileLookupError};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
