//! Read-only persistence interface consumed by resolution and settlement.

use crate::domain::{Artist, ArtistId, Battle, BattleId, Position, UserId};
use async_trait::async_trait;

/// Conjunctive battle listing filter; `None` fields impose no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleFilter {
    /// Matches battles where the artist is on either side.
    pub artist_id: Option<ArtistId>,
    /// Exact match on the raw status code.
    pub status: Option<i32>,
    pub created_by: Option<UserId>,
}

/// A battle joined with its artists' display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleListingRow {
    pub battle: Battle,
    pub side_a_name: Option<String>,
    pub side_b_name: Option<String>,
}

#[async_trait]
pub trait BattleStore: Send + Sync {
    async fn get_battle(&self, id: BattleId) -> Result<Option<Battle>, sqlx::Error>;

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>, sqlx::Error>;

    /// Battles matching `filter`, ordered by id ascending.
    async fn list_battles(&self, filter: &BattleFilter)
        -> Result<Vec<BattleListingRow>, sqlx::Error>;

    /// Positions ordered by id ascending; all users when `user_id` is `None`.
    async fn list_positions(&self, user_id: Option<UserId>) -> Result<Vec<Position>, sqlx::Error>;
}
