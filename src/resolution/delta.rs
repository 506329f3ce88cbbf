use super::ResolutionError;
use crate::domain::MetricSample;

/// Growth of the cumulative stream counter across a date-ordered history.
///
/// `last - first`; a single sample yields 0. Decreasing counters give a
/// negative delta rather than an error. Counters far enough apart to
/// overflow `i64` are rejected with `DeltaOverflow`.
pub fn playcount_delta(samples: &[MetricSample]) -> Result<i64, ResolutionError> {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => last
            .streams
            .checked_sub(first.streams)
            .ok_or(ResolutionError::DeltaOverflow {
                first: first.streams,
                last: last.streams,
            }),
        _ => Err(ResolutionError::InsufficientData),
    }
}
