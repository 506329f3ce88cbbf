//! Position operations for the repository.

use super::{decode_amount, Repository};
use crate::domain::{BattleId, Position, PositionId, Side, UserId};
use sqlx::Row;

impl Repository {
    /// Query positions, optionally restricted to one user, by id ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored side code is invalid.
    pub(super) async fn query_positions(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<Position>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, battle_id, user_id, side, amount
            FROM positions
            WHERE (?1 IS NULL OR user_id = ?1)
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.map(|u| u.as_i64()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let side = row
                    .try_get::<Option<i64>, _>("side")?
                    .map(Side::from_code)
                    .transpose()
                    .map_err(|e| sqlx::Error::ColumnDecode {
                        index: "side".to_string(),
                        source: format!("invalid side code {}", e.0).into(),
                    })?;

                Ok(Position {
                    id: PositionId::new(row.try_get("id")?),
                    battle_id: BattleId::new(row.try_get("battle_id")?),
                    user_id: UserId::new(row.try_get("user_id")?),
                    side,
                    amount: decode_amount("amount", row.try_get("amount")?)?,
                })
            })
            .collect()
    }

    /// Insert a position (fixtures and seeding).
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_position(&self, position: &Position) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO positions (id, battle_id, user_id, side, amount) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(position.id.as_i64())
        .bind(position.battle_id.as_i64())
        .bind(position.user_id.as_i64())
        .bind(position.side.map(|s| i64::from(s.code())))
        .bind(position.amount.to_canonical_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::migrations::init_db;
    use crate::db::{BattleStore, Repository};
    use crate::domain::{Amount, Artist, ArtistId, Battle, BattleId, Position, PositionId, Side, UserId};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    async fn setup_with_battle() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let repo = Repository::new(init_db(&db_path).await.expect("init_db failed"));

        for id in [1, 2] {
            repo.insert_artist(&Artist {
                id: ArtistId::new(id),
                spotify_id: format!("sp-{}", id),
                name: format!("Artist {}", id),
            })
            .await
            .unwrap();
        }
        repo.insert_battle(&Battle {
            id: BattleId::new(7),
            battle_type: 0,
            status: 0,
            side_a_id: ArtistId::new(1),
            side_b_id: ArtistId::new(2),
            amount_a: Amount::from(0),
            amount_b: Amount::from(0),
            total: Amount::from(0),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            created_by: UserId::new(1),
        })
        .await
        .unwrap();

        (repo, temp_dir)
    }

    fn position(id: i64, user: i64, side: Option<Side>, amount: &str) -> Position {
        Position {
            id: PositionId::new(id),
            battle_id: BattleId::new(7),
            user_id: UserId::new(user),
            side,
            amount: Amount::from_str_canonical(amount).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_positions_by_user_in_id_order() {
        let (repo, _temp) = setup_with_battle().await;
        let p3 = position(3, 42, Some(Side::B), "30");
        let p1 = position(1, 42, None, "123456789012345");
        let p2 = position(2, 5, Some(Side::A), "20");
        for p in [&p3, &p1, &p2] {
            repo.insert_position(p).await.unwrap();
        }

        let mine = repo.list_positions(Some(UserId::new(42))).await.unwrap();
        assert_eq!(mine, vec![p1.clone(), p3.clone()]);

        let all = repo.list_positions(None).await.unwrap();
        assert_eq!(all, vec![p1, p2, p3]);
    }

    #[tokio::test]
    async fn test_position_requires_existing_battle() {
        let (repo, _temp) = setup_with_battle().await;
        let mut orphan = position(1, 42, None, "1");
        orphan.battle_id = BattleId::new(999);
        assert!(repo.insert_position(&orphan).await.is_err());
    }
}
