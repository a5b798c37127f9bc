//! Table mappings for the users store.

pub mod user;
