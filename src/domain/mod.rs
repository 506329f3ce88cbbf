//! Domain types for battle resolution and position settlement.
//!
//! This module provides:
//! - Lossless integer amounts via the Amount wrapper
//! - Record ids and the two-valued battle Side
//! - Battle, Artist and Position records
//! - Metric history samples and query parameters
//! - The caller identity derived from a verified token

pub mod amount;
pub mod battle;
pub mod identity;
pub mod metric;
pub mod position;
pub mod primitives;

pub use amount::{Amount, AmountParseError};
pub use battle::{Artist, Battle, BattleInvariantError, BattleStatus};
pub use identity::AuthenticatedIdentity;
pub use metric::{MetricQuery, MetricSample, MetricSource};
pub use position::Position;
pub use primitives::{ArtistId, BattleId, InvalidSideCode, PositionId, Side, UserId};
