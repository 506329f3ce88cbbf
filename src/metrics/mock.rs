//! Mock metrics client for testing without network calls.

use super::{check_range, MetricsClient, MetricsError};
use crate::domain::{MetricQuery, MetricSample};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::time::Duration;

/// Mock metrics client that serves predefined per-artist histories.
#[derive(Debug, Clone, Default)]
pub struct MockMetricsClient {
    histories: HashMap<String, Vec<MetricSample>>,
    failures: HashMap<String, MetricsError>,
    delays: HashMap<String, Duration>,
}

impl MockMetricsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add samples to an artist's history.
    pub fn with_history(mut self, external_artist_id: &str, samples: Vec<MetricSample>) -> Self {
        self.histories
            .entry(external_artist_id.to_string())
            .or_default()
            .extend(samples);
        self
    }

    /// Give an artist a two-point history growing by `delta` between
    /// `start` and `end`.
    pub fn with_growth(
        self,
        external_artist_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        delta: i64,
    ) -> Self {
        let base = 1_000_000;
        self.with_history(
            external_artist_id,
            vec![
                MetricSample::new(start, base),
                MetricSample::new(end, base + delta),
            ],
        )
    }

    /// Make every fetch for an artist fail with `error`.
    pub fn with_failure(mut self, external_artist_id: &str, error: MetricsError) -> Self {
        self.failures.insert(external_artist_id.to_string(), error);
        self
    }

    /// Delay every fetch for an artist before answering.
    pub fn with_delay(mut self, external_artist_id: &str, delay: Duration) -> Self {
        self.delays.insert(external_artist_id.to_string(), delay);
        self
    }
}

#[async_trait]
impl MetricsClient for MockMetricsClient {
    async fn fetch_history(
        &self,
        query: &MetricQuery,
    ) -> Result<Vec<MetricSample>, MetricsError> {
        check_range(query)?;

        if let Some(delay) = self.delays.get(&query.external_artist_id) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(err) = self.failures.get(&query.external_artist_id) {
            return Err(err.clone());
        }

        let mut samples: Vec<MetricSample> = self
            .histories
            .get(&query.external_artist_id)
            .map(|h| {
                h.iter()
                    .filter(|s| s.date >= query.start_date && s.date <= query.end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        samples.sort_by_key(|s| s.date);
        Ok(samples)
    }
}
