//! Listening-metric history samples.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Platform a metric history is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricSource {
    Spotify,
}

impl MetricSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricSource::Spotify => "spotify",
        }
    }
}

impl std::fmt::Display for MetricSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point on an artist's cumulative stream-count curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSample {
    pub date: NaiveDate,
    /// Cumulative stream counter as of `date`.
    pub streams: i64,
}

impl MetricSample {
    pub fn new(date: NaiveDate, streams: i64) -> Self {
        Self { date, streams }
    }
}

/// Parameters for one history lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    pub external_artist_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub source: MetricSource,
}
