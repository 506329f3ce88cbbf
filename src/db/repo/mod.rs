//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `battles.rs` - Battle and artist operations
//! - `positions.rs` - Position operations

mod battles;
mod positions;

use super::store::{BattleFilter, BattleListingRow, BattleStore};
use crate::domain::{Amount, Artist, ArtistId, Battle, BattleId, Position, UserId};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }
}

#[async_trait]
impl BattleStore for Repository {
    async fn get_battle(&self, id: BattleId) -> Result<Option<Battle>, sqlx::Error> {
        self.query_battle(id).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>, sqlx::Error> {
        self.query_artist(id).await
    }

    async fn list_battles(
        &self,
        filter: &BattleFilter,
    ) -> Result<Vec<BattleListingRow>, sqlx::Error> {
        self.query_battles(filter).await
    }

    async fn list_positions(&self, user_id: Option<UserId>) -> Result<Vec<Position>, sqlx::Error> {
        self.query_positions(user_id).await
    }
}

/// Parse a TEXT amount column, surfacing bad data as a decode error.
fn decode_amount(column: &str, raw: &str) -> Result<Amount, sqlx::Error> {
    Amount::from_str_canonical(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
