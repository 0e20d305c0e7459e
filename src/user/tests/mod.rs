//! Unit tests for the user registry.
