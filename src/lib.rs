//! Timetrack: per-user work time tracking over HTTP.
//!
//! This crate records users, identified by passport credentials and enriched
//! through an external profile lookup, and tracks work tasks as start/end
//! intervals with duration reporting.
//!
//! # Architecture
//!
//! Timetrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`user`]: Passport validation, profile resolution and the user registry
//! - [`task`]: Task start/end lifecycle and period reporting
//! - [`store`]: Shared in-memory store and `PostgreSQL` bootstrap
//! - [`api`]: HTTP boundary built on axum
//! - [`app`]: Wiring of configuration, stores and services

pub mod api;
pub mod app;
pub mod config;
pub mod deadline;
pub mod store;
pub mod task;
pub mod telemetry;
pub mod user;

#[cfg(test)]
mod test_support;
