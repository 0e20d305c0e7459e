//! Storage backends shared by the user and task contexts.
//!
//! [`memory::InMemoryStore`] implements both repository ports over a single
//! lock so that referential rules (task ownership, cascading user removal)
//! hold across contexts. [`postgres`] owns the connection pool and schema
//! bootstrap used by the diesel adapters.

pub mod memory;
pub mod postgres;
