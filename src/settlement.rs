//! Battle listings annotated with the caller's financial position.

use crate::db::{BattleFilter, BattleListingRow, BattleStore};
use crate::domain::{Amount, ArtistId, AuthenticatedIdentity, BattleId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// A battle as shown to a caller.
///
/// `is_battle_owner` and `deposited_amount` are present only for
/// authenticated callers; anonymous listings omit the keys entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleListing {
    pub id: BattleId,
    #[serde(rename = "type")]
    pub battle_type: i32,
    pub status: i32,
    pub side_a_id: ArtistId,
    pub side_b_id: ArtistId,
    pub side_a_name: Option<String>,
    pub side_b_name: Option<String>,
    pub amount_a: Amount,
    pub amount_b: Amount,
    pub total: Amount,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_by: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_battle_owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposited_amount: Option<Amount>,
}

impl From<BattleListingRow> for BattleListing {
    fn from(row: BattleListingRow) -> Self {
        let b = row.battle;
        Self {
            id: b.id,
            battle_type: b.battle_type,
            status: b.status,
            side_a_id: b.side_a_id,
            side_b_id: b.side_b_id,
            side_a_name: row.side_a_name,
            side_b_name: row.side_b_name,
            amount_a: b.amount_a,
            amount_b: b.amount_b,
            total: b.total,
            start_date: b.start_date,
            end_date: b.end_date,
            created_by: b.created_by,
            is_battle_owner: None,
            deposited_amount: None,
        }
    }
}

#[derive(Clone)]
pub struct SettlementView {
    store: Arc<dyn BattleStore>,
}

impl SettlementView {
    pub fn new(store: Arc<dyn BattleStore>) -> Self {
        Self { store }
    }

    /// List battles matching `filter`, merged with the caller's positions.
    ///
    /// If the caller holds several positions on one battle, the one with the
    /// lowest position id supplies `deposited_amount`.
    pub async fn list_battles(
        &self,
        filter: &BattleFilter,
        caller: Option<&AuthenticatedIdentity>,
    ) -> Result<Vec<BattleListing>, sqlx::Error> {
        let Some(identity) = caller else {
            let rows = self.store.list_battles(filter).await?;
            return Ok(rows.into_iter().map(BattleListing::from).collect());
        };

        let (rows, positions) = futures::try_join!(
            self.store.list_battles(filter),
            self.store.list_positions(Some(identity.user_id))
        )?;

        let mut deposits: HashMap<BattleId, Amount> = HashMap::new();
        for position in positions {
            deposits.entry(position.battle_id).or_insert(position.amount);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut listing = BattleListing::from(row);
                listing.is_battle_owner = Some(listing.created_by == identity.user_id);
                listing.deposited_amount =
                    Some(deposits.get(&listing.id).copied().unwrap_or_default());
                listing
            })
            .collect())
    }
}
