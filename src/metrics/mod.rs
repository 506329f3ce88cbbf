//! Metrics client abstraction for fetching artist listening history.

use crate::domain::{MetricQuery, MetricSample};
use async_trait::async_trait;
use std::fmt;

pub mod mock;
pub mod songstats;

pub use mock::MockMetricsClient;
pub use songstats::SongstatsClient;

/// Client for an external time-series metrics API.
///
/// Implementations must not retry; retry policy belongs to the caller.
#[async_trait]
pub trait MetricsClient: Send + Sync + fmt::Debug {
    /// Fetch the cumulative stream history for one artist.
    ///
    /// # Returns
    /// Samples within `[start_date, end_date]`, ordered by date ascending.
    async fn fetch_history(&self, query: &MetricQuery)
        -> Result<Vec<MetricSample>, MetricsError>;
}

/// Error type for metrics client operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// Network error (e.g., connection refused, DNS failure)
    NetworkError(String),
    /// Non-success HTTP status from the provider
    HttpError { status: u16, message: String },
    /// Invalid JSON or unexpected response shape
    ParseError(String),
    /// Provider returned 429
    RateLimited,
    /// No response within the caller's deadline
    Timeout,
    /// `start_date` is after `end_date`
    InvalidRange,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MetricsError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            MetricsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            MetricsError::RateLimited => write!(f, "Rate limited"),
            MetricsError::Timeout => write!(f, "Timed out"),
            MetricsError::InvalidRange => write!(f, "start_date is after end_date"),
        }
    }
}

impl std::error::Error for MetricsError {}

pub(crate) fn check_range(query: &MetricQuery) -> Result<(), MetricsError> {
    if query.start_date > query.end_date {
        return Err(MetricsError::InvalidRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_error_display() {
        let err = MetricsError::NetworkError("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = MetricsError::HttpError {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 401: Unauthorized");

        assert_eq!(MetricsError::RateLimited.to_string(), "Rate limited");
        assert_eq!(MetricsError::Timeout.to_string(), "Timed out");
    }
}
