//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling for services and HTTP
//! - Configuration structures and `.env` loading
//! - Call recording used by the service logging decorators

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt, ResultExt};
pub use telemetry::{observe, CallRecord};
