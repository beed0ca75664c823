//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record, its creation and update inputs, list filters, and the
//! entity factories that assign identity to new records.

pub mod constants;
pub mod error;
pub mod factory;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use factory::{IdStrategy, SequentialUserFactory, UnknownIdStrategy, UserFactory, UuidUserFactory};
pub use user::{CreateUser, UpdateUser, User, UserFilter};

#[cfg(any(test, feature = "test-utils"))]
pub use factory::MockUserFactory;
