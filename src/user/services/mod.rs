//! Application services for the user registry.

mod registry;

pub use registry::{
    RegisterUserRequest, UpdateUserRequest, UserRegistryError, UserRegistryResult,
    UserRegistryService,
};
