use super::{playcount_delta, ResolutionError};
use crate::db::BattleStore;
use crate::domain::{Artist, ArtistId, Battle, BattleId, MetricQuery, MetricSource, Side};
use crate::metrics::{MetricsClient, MetricsError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Decides battle winners from external listening-metric growth.
///
/// Resolution is computed on demand and never written back to the store.
#[derive(Clone)]
pub struct BattleResolver {
    store: Arc<dyn BattleStore>,
    metrics: Arc<dyn MetricsClient>,
    fetch_timeout: Duration,
}

/// Side A wins unless side B grew strictly more; ties settle to A.
pub fn pick_winner(delta_a: i64, delta_b: i64) -> Side {
    if delta_a >= delta_b {
        Side::A
    } else {
        Side::B
    }
}

impl BattleResolver {
    pub fn new(
        store: Arc<dyn BattleStore>,
        metrics: Arc<dyn MetricsClient>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            store,
            metrics,
            fetch_timeout,
        }
    }

    /// Load a battle and resolve its winner.
    pub async fn resolve_battle(&self, id: BattleId) -> Result<Side, ResolutionError> {
        let battle = self
            .store
            .get_battle(id)
            .await?
            .ok_or(ResolutionError::BattleNotFound(id))?;

        self.resolve_winner(&battle).await
    }

    /// Resolve the winner of an already-loaded battle.
    pub async fn resolve_winner(&self, battle: &Battle) -> Result<Side, ResolutionError> {
        let (artist_a, artist_b) = futures::try_join!(
            self.load_artist(battle.side_a_id),
            self.load_artist(battle.side_b_id)
        )?;

        let (delta_a, delta_b) = futures::try_join!(
            self.side_delta(battle, &artist_a),
            self.side_delta(battle, &artist_b)
        )?;

        let winner = pick_winner(delta_a, delta_b);
        info!(
            "Battle {} resolved: sideA delta={}, sideB delta={}, winner={}",
            battle.id, delta_a, delta_b, winner
        );
        if let Some(recorded) = battle.status().and_then(|s| s.winner()) {
            if recorded != winner {
                warn!(
                    "Battle {} is recorded as won by side {} but metrics now favour side {}",
                    battle.id, recorded, winner
                );
            }
        }
        Ok(winner)
    }

    async fn load_artist(&self, id: ArtistId) -> Result<Artist, ResolutionError> {
        self.store
            .get_artist(id)
            .await?
            .ok_or(ResolutionError::ArtistNotFound(id))
    }

    async fn side_delta(&self, battle: &Battle, artist: &Artist) -> Result<i64, ResolutionError> {
        let (start_date, end_date) = battle.window();
        let query = MetricQuery {
            external_artist_id: artist.spotify_id.clone(),
            start_date,
            end_date,
            source: MetricSource::Spotify,
        };
        debug!(
            "Battle {}: fetching history for artist {} ({})",
            battle.id, artist.id, artist.spotify_id
        );

        let samples = tokio::time::timeout(self.fetch_timeout, self.metrics.fetch_history(&query))
            .await
            .unwrap_or(Err(MetricsError::Timeout))
            .map_err(|source| ResolutionError::MetricsUnavailable {
                artist: artist.spotify_id.clone(),
                source,
            })?;

        playcount_delta(&samples)
    }
}
