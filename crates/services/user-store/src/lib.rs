//! User Store Library
//!
//! In-memory user record storage with soft delete semantics. The repository
//! can be embedded directly or driven from the `user-store` batch CLI.

pub mod batch;
pub mod config;
pub mod repository;

use tracing::info;

use common::AppResult;

use crate::batch::Outcome;
use crate::config::UserStoreConfig;
use crate::repository::InMemoryUserStore;

/// Build an empty store using the configured id strategy.
pub fn build_store(config: &UserStoreConfig) -> InMemoryUserStore {
    InMemoryUserStore::new(config.id_strategy.factory())
}

/// Parse a batch script and run it against a fresh store.
pub async fn run_batch(config: &UserStoreConfig, input: &str) -> AppResult<Vec<Outcome>> {
    let ops = batch::parse(input)?;
    let store = build_store(config);

    info!(
        service = %config.service.service_name,
        id_strategy = %config.id_strategy,
        operations = ops.len(),
        "Running batch"
    );

    Ok(batch::run(&store, ops).await)
}
