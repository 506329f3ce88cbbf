//! Battle and artist records as read from the store.

use super::{Amount, ArtistId, BattleId, Side, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a battle, stored as a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleStatus {
    Open,
    ResolvedA,
    ResolvedB,
}

impl BattleStatus {
    pub fn code(&self) -> i32 {
        match self {
            BattleStatus::Open => 0,
            BattleStatus::ResolvedA => 1,
            BattleStatus::ResolvedB => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BattleStatus::Open),
            1 => Some(BattleStatus::ResolvedA),
            2 => Some(BattleStatus::ResolvedB),
            _ => None,
        }
    }

    /// Winning side recorded by this status, if the battle is settled.
    pub fn winner(&self) -> Option<Side> {
        match self {
            BattleStatus::Open => None,
            BattleStatus::ResolvedA => Some(Side::A),
            BattleStatus::ResolvedB => Some(Side::B),
        }
    }
}

/// A timed competition between two artists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battle {
    pub id: BattleId,
    pub battle_type: i32,
    /// Raw status code; see [`BattleStatus`].
    pub status: i32,
    pub side_a_id: ArtistId,
    pub side_b_id: ArtistId,
    pub amount_a: Amount,
    pub amount_b: Amount,
    pub total: Amount,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleInvariantError {
    #[error("battle {id}: total {total} != amountA + amountB ({sum})")]
    TotalMismatch {
        id: BattleId,
        total: String,
        sum: String,
    },
    #[error("battle {0}: amountA + amountB overflows")]
    TotalOverflow(BattleId),
    #[error("battle {0}: start_date must be before end_date")]
    EmptyWindow(BattleId),
}

impl Battle {
    /// Check `total == amount_a + amount_b` and `start_date < end_date`.
    pub fn validate(&self) -> Result<(), BattleInvariantError> {
        let sum = self
            .amount_a
            .checked_add(self.amount_b)
            .ok_or(BattleInvariantError::TotalOverflow(self.id))?;
        if sum != self.total {
            return Err(BattleInvariantError::TotalMismatch {
                id: self.id,
                total: self.total.to_canonical_string(),
                sum: sum.to_canonical_string(),
            });
        }
        if self.start_date >= self.end_date {
            return Err(BattleInvariantError::EmptyWindow(self.id));
        }
        Ok(())
    }

    pub fn status(&self) -> Option<BattleStatus> {
        BattleStatus::from_code(self.status)
    }

    /// Measurement window as UTC calendar dates.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date.date_naive(), self.end_date.date_naive())
    }
}

/// An artist competing in battles, keyed on the streaming platform by
/// `spotify_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub spotify_id: String,
    pub name: String,
}
