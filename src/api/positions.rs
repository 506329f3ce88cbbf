use crate::api::AppState;
use crate::db::BattleStore;
use crate::domain::{Position, UserId};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionsQuery {
    pub user_id: Option<i64>,
}

/// Positions for one user, or every position when no user is given.
pub async fn list_positions(
    Query(params): Query<PositionsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Position>>, AppError> {
    let positions = state
        .store
        .list_positions(params.user_id.map(UserId::new))
        .await?;
    Ok(Json(positions))
}
