//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified application error type with stable error codes
//! - Shared configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, ErrorResponse, OptionExt};
