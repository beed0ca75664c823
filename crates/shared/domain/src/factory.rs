//! Entity factories that turn creation input into full user records.
//!
//! The repository never invents identity itself: it hands validated input to
//! a [`UserFactory`] and stores whatever record comes back.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{ID_STRATEGY_SEQUENTIAL, ID_STRATEGY_UUID, SEQUENTIAL_ID_START};
use crate::user::{CreateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Builds a user record with a fresh identity from creation input.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UserFactory: Send + Sync {
    /// Create a record carrying the same field values as `input`
    fn create(&self, input: CreateUser) -> User;
}

fn build(id: String, input: CreateUser) -> User {
    let now = Utc::now();
    User {
        id,
        name: input.name,
        age: input.age,
        city: input.city,
        created_at: Some(now),
        updated_at: Some(now),
        deleted_at: None,
    }
}

/// Factory assigning random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidUserFactory;

impl UserFactory for UuidUserFactory {
    fn create(&self, input: CreateUser) -> User {
        build(Uuid::new_v4().to_string(), input)
    }
}

/// Factory assigning increasing numeric ids ("1", "2", ...)
#[derive(Debug)]
pub struct SequentialUserFactory {
    next: AtomicU64,
}

impl SequentialUserFactory {
    pub fn new() -> Self {
        Self::starting_at(SEQUENTIAL_ID_START)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialUserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserFactory for SequentialUserFactory {
    fn create(&self, input: CreateUser) -> User {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        build(id.to_string(), input)
    }
}

/// Identity generation strategy selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl IdStrategy {
    /// Build the factory for this strategy
    pub fn factory(self) -> Arc<dyn UserFactory> {
        match self {
            IdStrategy::Uuid => Arc::new(UuidUserFactory),
            IdStrategy::Sequential => Arc::new(SequentialUserFactory::new()),
        }
    }
}

/// Returned when parsing an unrecognized strategy name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown id strategy '{0}' (expected 'uuid' or 'sequential')")]
pub struct UnknownIdStrategy(pub String);

impl FromStr for IdStrategy {
    type Err = UnknownIdStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ID_STRATEGY_UUID => Ok(IdStrategy::Uuid),
            ID_STRATEGY_SEQUENTIAL => Ok(IdStrategy::Sequential),
            _ => Err(UnknownIdStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Uuid => write!(f, "{}", ID_STRATEGY_UUID),
            IdStrategy::Sequential => write!(f, "{}", ID_STRATEGY_SEQUENTIAL),
        }
    }
}
