use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{AppState, OptionalIdentity};
use crate::db::BattleFilter;
use crate::domain::{ArtistId, BattleId, Side, UserId};
use crate::error::AppError;
use crate::settlement::BattleListing;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlesQuery {
    pub artist_id: Option<i64>,
    pub status: Option<String>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub id: BattleId,
    pub winner: Side,
}

#[derive(Debug, Deserialize)]
pub struct ResolveBulkRequest {
    pub ids: Vec<i64>,
}

pub async fn list_battles(
    Query(params): Query<BattlesQuery>,
    State(state): State<AppState>,
    OptionalIdentity(caller): OptionalIdentity,
) -> Result<Json<Vec<BattleListing>>, AppError> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            s.parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("Invalid status filter: {}", s)))?,
        ),
    };

    let filter = BattleFilter {
        artist_id: params.artist_id.map(ArtistId::new),
        status,
        created_by: params.created_by.map(UserId::new),
    };

    let listings = state
        .settlement
        .list_battles(&filter, caller.as_ref())
        .await?;

    Ok(Json(listings))
}

pub async fn resolve_battle(
    State(state): State<AppState>,
    Json(body): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let id = BattleId::new(body.id);
    let winner = state.resolver.resolve_battle(id).await?;
    Ok(Json(ResolveResponse { id, winner }))
}

/// Winners for many battles as one ASCII digit per requested id.
pub async fn resolve_battles_bulk(
    State(state): State<AppState>,
    Json(body): Json<ResolveBulkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ids: Vec<BattleId> = body.ids.into_iter().map(BattleId::new).collect();
    let encoded = state.resolver.resolve_many(&ids).await?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], encoded))
}
