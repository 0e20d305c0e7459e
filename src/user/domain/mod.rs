//! Domain model for the user registry.
//!
//! Passport parsing, identity profiles, partial updates and list queries live
//! here, free of persistence and transport concerns.

mod error;
mod ids;
mod passport;
mod patch;
mod profile;
mod query;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use passport::Passport;
pub use patch::UserPatch;
pub use profile::Profile;
pub use query::{Page, UserFilter};
pub use user::{NewUser, PersistedUserData, User};
