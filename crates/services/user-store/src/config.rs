//! User store configuration.

use std::env;

use common::{AppError, AppResult, ServiceConfig};
use domain::IdStrategy;

/// Environment variable prefix for this service
pub const ENV_PREFIX: &str = "USER_STORE";

/// User store configuration.
#[derive(Debug, Clone)]
pub struct UserStoreConfig {
    /// Service name and log filter
    pub service: ServiceConfig,
    /// Identity generation strategy for new users
    pub id_strategy: IdStrategy,
}

impl UserStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `USER_STORE_ID_STRATEGY`, `USER_STORE_SERVICE_NAME` and
    /// `USER_STORE_LOG_LEVEL` (falling back to `RUST_LOG`).
    pub fn from_env() -> AppResult<Self> {
        let id_strategy = match env::var(format!("{ENV_PREFIX}_ID_STRATEGY")) {
            Ok(raw) => raw
                .parse()
                .map_err(|e: domain::UnknownIdStrategy| AppError::config(e.to_string()))?,
            Err(_) => IdStrategy::default(),
        };

        Ok(Self {
            service: ServiceConfig::from_env(ENV_PREFIX, "user-store"),
            id_strategy,
        })
    }

    /// Override the id strategy (e.g. from a CLI flag)
    pub fn with_id_strategy(mut self, id_strategy: Option<IdStrategy>) -> Self {
        if let Some(strategy) = id_strategy {
            self.id_strategy = strategy;
        }
        self
    }
}

impl Default for UserStoreConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-store".to_string(),
                ..ServiceConfig::default()
            },
            id_strategy: IdStrategy::default(),
        }
    }
}
