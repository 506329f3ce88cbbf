//! Concurrent bulk resolution and the compact outcome encoding.
//!
//! Outcomes are encoded as one ASCII digit per battle (`'0'` side A,
//! `'1'` side B) in request order, e.g. `[A, B]` becomes `b"01"`.

use super::{BattleResolver, ResolutionError};
use crate::domain::{BattleId, Side};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{info, warn};

impl BattleResolver {
    /// Resolve every battle concurrently and encode the winners in input
    /// order.
    ///
    /// All-or-nothing: the first failure aborts the batch, dropping any
    /// resolutions still in flight.
    pub async fn resolve_many(&self, ids: &[BattleId]) -> Result<Vec<u8>, ResolutionError> {
        let mut pending: FuturesUnordered<_> = ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| async move { (idx, id, self.resolve_battle(id).await) })
            .collect();

        // Completion order is arbitrary; each outcome lands in its input slot.
        let mut slots: Vec<Option<Side>> = vec![None; ids.len()];
        while let Some((idx, id, outcome)) = pending.next().await {
            match outcome {
                Ok(side) => slots[idx] = Some(side),
                Err(e) => {
                    warn!("Bulk resolution aborted at battle {}: {}", id, e);
                    return Err(e);
                }
            }
        }

        let outcomes = slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.ok_or_else(|| {
                    ResolutionError::EncodingFailure(format!("missing outcome at index {}", idx))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Resolved {} battles in bulk", outcomes.len());
        Ok(encode_outcomes(&outcomes))
    }
}

/// Concatenate each side's ASCII digit and return the UTF-8 bytes.
pub fn encode_outcomes(outcomes: &[Side]) -> Vec<u8> {
    outcomes
        .iter()
        .map(Side::as_digit)
        .collect::<String>()
        .into_bytes()
}

/// Inverse of [`encode_outcomes`]; any byte other than `'0'`/`'1'` fails.
pub fn decode_outcomes(bytes: &[u8]) -> Result<Vec<Side>, ResolutionError> {
    bytes
        .iter()
        .map(|&b| Side::from_digit(b).map_err(|e| ResolutionError::EncodingFailure(e.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{jan, seed_battle, setup_repo};
    use crate::metrics::{MetricsError, MockMetricsClient};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_encode_outcomes() {
        assert_eq!(encode_outcomes(&[Side::A, Side::B]), b"01".to_vec());
        assert_eq!(encode_outcomes(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_outcomes() {
        let sides = tokio_test::assert_ok!(decode_outcomes(b"0110"));
        assert_eq!(sides, vec![Side::A, Side::B, Side::B, Side::A]);

        let err = tokio_test::assert_err!(decode_outcomes(b"01x"));
        assert!(matches!(err, ResolutionError::EncodingFailure(_)));
    }

    #[tokio::test]
    async fn test_output_order_matches_input_not_completion() {
        let (repo, _temp) = setup_repo().await;
        // battle 1: sp-1 (slow) vs sp-2 -> B; battle 2: sp-3 vs sp-4 -> A;
        // battle 3: sp-5 vs sp-6 (fast) -> B
        seed_battle(&repo, 1, 1, 2).await;
        seed_battle(&repo, 2, 3, 4).await;
        seed_battle(&repo, 3, 5, 6).await;

        let metrics = MockMetricsClient::new()
            .with_growth("sp-1", jan(1), jan(31), 10)
            .with_growth("sp-2", jan(1), jan(31), 20)
            .with_delay("sp-1", Duration::from_millis(120))
            .with_growth("sp-3", jan(1), jan(31), 50)
            .with_growth("sp-4", jan(1), jan(31), 40)
            .with_delay("sp-3", Duration::from_millis(60))
            .with_growth("sp-5", jan(1), jan(31), 0)
            .with_growth("sp-6", jan(1), jan(31), 1);
        let resolver = BattleResolver::new(repo, Arc::new(metrics), Duration::from_secs(5));

        let ids = [BattleId::new(1), BattleId::new(2), BattleId::new(3)];
        assert_eq!(resolver.resolve_many(&ids).await.unwrap(), b"101".to_vec());

        let reversed = [BattleId::new(3), BattleId::new(2), BattleId::new(1)];
        assert_eq!(resolver.resolve_many(&reversed).await.unwrap(), b"101".to_vec());

        let repeated = [BattleId::new(2), BattleId::new(1), BattleId::new(2)];
        assert_eq!(resolver.resolve_many(&repeated).await.unwrap(), b"010".to_vec());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let (repo, _temp) = setup_repo().await;
        let resolver =
            BattleResolver::new(repo, Arc::new(MockMetricsClient::new()), Duration::from_secs(5));
        assert!(resolver.resolve_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_any_failure_fails_whole_batch() {
        let (repo, _temp) = setup_repo().await;
        seed_battle(&repo, 1, 1, 2).await;
        seed_battle(&repo, 2, 3, 4).await;

        let metrics = MockMetricsClient::new()
            .with_growth("sp-1", jan(1), jan(31), 10)
            .with_growth("sp-2", jan(1), jan(31), 20)
            .with_growth("sp-3", jan(1), jan(31), 10)
            .with_failure("sp-4", MetricsError::NetworkError("reset".to_string()));
        let resolver = BattleResolver::new(repo, Arc::new(metrics), Duration::from_secs(5));

        let err = resolver
            .resolve_many(&[BattleId::new(1), BattleId::new(2)])
            .await
            .unwrap_err();
        assert!(matches!(err, ResolutionError::MetricsUnavailable { .. }));

        let err = resolver
            .resolve_many(&[BattleId::new(1), BattleId::new(404)])
            .await
            .unwrap_err();
        assert!(matches!(err, ResolutionError::BattleNotFound(_)));
    }
}
