//! Songstats enterprise API client.

use super::{check_range, MetricsClient, MetricsError};
use crate::domain::{MetricQuery, MetricSample, MetricSource};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.songstats.com/enterprise/v1";

/// Metrics client backed by the Songstats artist `historic_stats` endpoint.
#[derive(Debug, Clone)]
pub struct SongstatsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct HistoricStatsResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    stats: Vec<PlatformStats>,
}

#[derive(Debug, Deserialize)]
struct PlatformStats {
    #[serde(default)]
    source: Option<String>,
    data: PlatformData,
}

#[derive(Debug, Deserialize)]
struct PlatformData {
    #[serde(default)]
    history: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
struct HistoryItem {
    date: String,
    #[serde(default)]
    streams_current: Option<i64>,
}

impl SongstatsClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl MetricsClient for SongstatsClient {
    async fn fetch_history(
        &self,
        query: &MetricQuery,
    ) -> Result<Vec<MetricSample>, MetricsError> {
        check_range(query)?;

        let start_date = query.start_date.format("%Y-%m-%d").to_string();
        let end_date = query.end_date.format("%Y-%m-%d").to_string();
        debug!(
            "Fetching history for artist={}, source={}, start_date={}, end_date={}",
            query.external_artist_id, query.source, start_date, end_date
        );

        let url = format!("{}/artists/historic_stats", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apiKey", &self.api_key)
            .query(&[
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("source", query.source.as_str()),
                ("spotify_artist_id", query.external_artist_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MetricsError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == 429 {
            return Err(MetricsError::RateLimited);
        }
        if !status.is_success() {
            return Err(MetricsError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
            });
        }

        let body = response
            .json::<HistoricStatsResponse>()
            .await
            .map_err(|e| MetricsError::ParseError(e.to_string()))?;

        parse_history(body, query.source)
    }
}

fn parse_history(
    body: HistoricStatsResponse,
    source: MetricSource,
) -> Result<Vec<MetricSample>, MetricsError> {
    if body.result.as_deref() == Some("error") {
        return Err(MetricsError::ParseError(format!(
            "provider error: {}",
            body.message.unwrap_or_default()
        )));
    }

    let mut stats = body.stats;
    let idx = stats
        .iter()
        .position(|s| s.source.as_deref() == Some(source.as_str()))
        .unwrap_or(0);
    if idx >= stats.len() {
        return Err(MetricsError::ParseError("Response has no stats".to_string()));
    }
    let history = stats.swap_remove(idx).data.history;

    let mut samples = Vec::with_capacity(history.len());
    for item in history {
        let date = match NaiveDate::parse_from_str(&item.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping history item with bad date {:?}: {}", item.date, e);
                continue;
            }
        };
        match item.streams_current {
            Some(streams) => samples.push(MetricSample::new(date, streams)),
            None => warn!("Skipping history item {} without streams_current", date),
        }
    }

    samples.sort_by_key(|s| s.date);
    Ok(samples)
}
