//! Step definitions for time tracking scenarios.

pub mod world;

mod given;
mod then;
mod when;
