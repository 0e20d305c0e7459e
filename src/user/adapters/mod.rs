//! Adapter implementations for user registry ports.

pub mod memory;
pub mod postgres;
pub mod profile_api;
