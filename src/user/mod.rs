//! User registry for Timetrack.
//!
//! Users are created from a passport identifier. The passport is validated
//! syntactically, resolved into a full identity profile through an external
//! lookup, and only then persisted. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
