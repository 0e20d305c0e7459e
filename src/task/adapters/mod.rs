//! Adapter implementations for task ports.
//!
//! The in-memory implementation shares its lock with the user store and
//! lives in [`crate::store::memory`].

pub mod postgres;
