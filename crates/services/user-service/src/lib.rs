//! User Service Library
//!
//! Staff record management for the canteen backend: the user repository
//! contract with SQL and in-memory stores, the user service with its upsert
//! policy, and the logging decorator the gateway wraps it in.

pub mod config;
pub mod repository;
pub mod service;

pub use config::UserServiceConfig;
pub use repository::{MemoryUserStore, UserRepository, UserStore};
pub use service::{LoggingUserService, UserManager, UserService};
