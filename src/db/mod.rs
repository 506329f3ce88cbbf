//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema setup
//! - The read-only `BattleStore` interface used by resolution and settlement
//! - The SQLite-backed `Repository` implementing it

#[cfg(test)]
pub(crate) mod fixtures;
pub mod migrations;
pub mod repo;
pub mod store;

pub use migrations::init_db;
pub use repo::Repository;
pub use store::{BattleFilter, BattleListingRow, BattleStore};
