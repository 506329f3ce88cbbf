pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod resolution;
pub mod settlement;

pub use auth::{IdentityResolver, TokenVerifier};
pub use config::Config;
pub use db::{init_db, BattleFilter, BattleStore, Repository};
pub use domain::{
    Amount, Artist, ArtistId, AuthenticatedIdentity, Battle, BattleId, BattleStatus, MetricSample,
    MetricSource, Position, Side, UserId,
};
pub use error::AppError;
pub use metrics::{MetricsClient, MetricsError, MockMetricsClient, SongstatsClient};
pub use resolution::{BattleResolver, ResolutionError};
pub use settlement::{BattleListing, SettlementView};
