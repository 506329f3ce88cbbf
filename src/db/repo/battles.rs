//! Battle and artist operations for the repository.

use super::{decode_amount, Repository};
use crate::db::store::{BattleFilter, BattleListingRow};
use crate::domain::{Artist, ArtistId, Battle, BattleId, UserId};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const BATTLE_COLUMNS: &str = "b.id, b.battle_type, b.status, b.side_a_id, b.side_b_id, \
     b.amount_a, b.amount_b, b.total, b.start_ms, b.end_ms, b.created_by";

impl Repository {
    /// Fetch a single battle by id.
    ///
    /// # Errors
    /// Returns an error if the query fails or the stored row breaks a
    /// battle invariant.
    pub(super) async fn query_battle(&self, id: BattleId) -> Result<Option<Battle>, sqlx::Error> {
        let sql = format!("SELECT {} FROM battles b WHERE b.id = ?", BATTLE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(battle_from_row).transpose()
    }

    pub(super) async fn query_artist(&self, id: ArtistId) -> Result<Option<Artist>, sqlx::Error> {
        let row = sqlx::query("SELECT id, spotify_id, name FROM artists WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            Ok(Artist {
                id: ArtistId::new(row.try_get("id")?),
                spotify_id: row.try_get("spotify_id")?,
                name: row.try_get("name")?,
            })
        })
        .transpose()
    }

    /// List battles matching the filter, joined with artist names.
    ///
    /// # Errors
    /// Returns an error if the query fails or any row breaks a battle
    /// invariant.
    pub(super) async fn query_battles(
        &self,
        filter: &BattleFilter,
    ) -> Result<Vec<BattleListingRow>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {}, sa.name AS side_a_name, sb.name AS side_b_name
            FROM battles b
            LEFT JOIN artists sa ON sa.id = b.side_a_id
            LEFT JOIN artists sb ON sb.id = b.side_b_id
            WHERE (?1 IS NULL OR b.side_a_id = ?1 OR b.side_b_id = ?1)
              AND (?2 IS NULL OR b.status = ?2)
              AND (?3 IS NULL OR b.created_by = ?3)
            ORDER BY b.id ASC
            "#,
            BATTLE_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(filter.artist_id.map(|a| a.as_i64()))
            .bind(filter.status)
            .bind(filter.created_by.map(|u| u.as_i64()))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(BattleListingRow {
                    battle: battle_from_row(row)?,
                    side_a_name: row.try_get("side_a_name")?,
                    side_b_name: row.try_get("side_b_name")?,
                })
            })
            .collect()
    }

    /// Insert an artist (fixtures and seeding).
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_artist(&self, artist: &Artist) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO artists (id, spotify_id, name) VALUES (?, ?, ?)")
            .bind(artist.id.as_i64())
            .bind(&artist.spotify_id)
            .bind(&artist.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a battle (fixtures and seeding).
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_battle(&self, battle: &Battle) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO battles
            (id, battle_type, status, side_a_id, side_b_id, amount_a, amount_b, total,
             start_ms, end_ms, created_by)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(battle.id.as_i64())
        .bind(battle.battle_type)
        .bind(battle.status)
        .bind(battle.side_a_id.as_i64())
        .bind(battle.side_b_id.as_i64())
        .bind(battle.amount_a.to_canonical_string())
        .bind(battle.amount_b.to_canonical_string())
        .bind(battle.total.to_canonical_string())
        .bind(battle.start_date.timestamp_millis())
        .bind(battle.end_date.timestamp_millis())
        .bind(battle.created_by.as_i64())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn battle_from_row(row: &SqliteRow) -> Result<Battle, sqlx::Error> {
    let battle = Battle {
        id: BattleId::new(row.try_get("id")?),
        battle_type: row.try_get("battle_type")?,
        status: row.try_get("status")?,
        side_a_id: ArtistId::new(row.try_get("side_a_id")?),
        side_b_id: ArtistId::new(row.try_get("side_b_id")?),
        amount_a: decode_amount("amount_a", row.try_get("amount_a")?)?,
        amount_b: decode_amount("amount_b", row.try_get("amount_b")?)?,
        total: decode_amount("total", row.try_get("total")?)?,
        start_date: decode_timestamp("start_ms", row.try_get("start_ms")?)?,
        end_date: decode_timestamp("end_ms", row.try_get("end_ms")?)?,
        created_by: UserId::new(row.try_get("created_by")?),
    };

    battle
        .validate()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(battle)
}

fn decode_timestamp(column: &str, ms: i64) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("timestamp out of range: {}", ms).into(),
    })
}
