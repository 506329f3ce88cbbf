use crate::resolution::ResolutionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ResolutionError> for AppError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::BattleNotFound(_) | ResolutionError::ArtistNotFound(_) => {
                AppError::BadRequest(err.to_string())
            }
            ResolutionError::MetricsUnavailable { .. } => AppError::Upstream(err.to_string()),
            ResolutionError::InsufficientData
            | ResolutionError::DeltaOverflow { .. }
            | ResolutionError::EncodingFailure(_)
            | ResolutionError::Store(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtistId, BattleId};
    use crate::metrics::MetricsError;

    fn status_of(err: ResolutionError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_resolution_error_status_mapping() {
        assert_eq!(
            status_of(ResolutionError::BattleNotFound(BattleId::new(1))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ResolutionError::ArtistNotFound(ArtistId::new(1))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ResolutionError::MetricsUnavailable {
                artist: "sp".to_string(),
                source: MetricsError::Timeout,
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ResolutionError::InsufficientData),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ResolutionError::DeltaOverflow {
                first: i64::MIN,
                last: 1,
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::from(ResolutionError::BattleNotFound(BattleId::new(7)));
        assert_eq!(err.to_string(), "Bad request: Battle with ID 7 not found");
    }
}
