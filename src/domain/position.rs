use super::{Amount, BattleId, PositionId, Side, UserId};
use serde::Serialize;

/// A user's stake in one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub battle_id: BattleId,
    pub user_id: UserId,
    /// Explicit side flag; `None` when the side is implied by which pool
    /// the amount was placed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    pub amount: Amount,
}
