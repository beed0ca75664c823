//! Shared configuration structures.

use std::env;

use serde::{Deserialize, Serialize};

/// Default log filter when neither the service variable nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Base service configuration shared by all binaries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log filter directive (e.g. "info", "user_store_lib=debug")
    pub log_level: String,
}

impl ServiceConfig {
    /// Load from `<PREFIX>_SERVICE_NAME` and `<PREFIX>_LOG_LEVEL`.
    ///
    /// The log level falls back to `RUST_LOG`, then to [`DEFAULT_LOG_LEVEL`].
    pub fn from_env(prefix: &str, default_name: &str) -> Self {
        Self {
            service_name: env::var(format!("{prefix}_SERVICE_NAME"))
                .unwrap_or_else(|_| default_name.to_string()),
            log_level: env::var(format!("{prefix}_LOG_LEVEL"))
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
