//! Battle outcome resolution.
//!
//! - `delta` reduces a metric history to its growth over the window
//! - `resolver` decides the winner of a single battle
//! - `bulk` resolves many battles concurrently and encodes the outcomes

pub mod bulk;
pub mod delta;
pub mod resolver;

use crate::domain::{ArtistId, BattleId};
use crate::metrics::MetricsError;
use thiserror::Error;

pub use bulk::{decode_outcomes, encode_outcomes};
pub use delta::playcount_delta;
pub use resolver::{pick_winner, BattleResolver};

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Battle with ID {0} not found")]
    BattleNotFound(BattleId),
    #[error("Artist with ID {0} not found")]
    ArtistNotFound(ArtistId),
    #[error("Metric history is empty")]
    InsufficientData,
    #[error("Stream counter delta overflows: {first} -> {last}")]
    DeltaOverflow { first: i64, last: i64 },
    #[error("Metrics unavailable for artist {artist}: {source}")]
    MetricsUnavailable {
        artist: String,
        #[source]
        source: MetricsError,
    },
    #[error("Unexpected winner code: {0}")]
    EncodingFailure(String),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}
