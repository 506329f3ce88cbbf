//! Shared sqlite fixtures for unit tests.

use crate::db::{init_db, Repository};
use crate::domain::{Amount, Artist, ArtistId, Battle, BattleId, Position, PositionId, UserId};
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

pub(crate) async fn setup_repo() -> (Arc<Repository>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    (Arc::new(Repository::new(pool)), temp_dir)
}

/// Insert artists `side_a`/`side_b` (spotify ids `sp-<id>`, skipped if
/// already present) and a January 2024 battle between them created by
/// user 42.
pub(crate) async fn seed_battle(repo: &Repository, id: i64, side_a: i64, side_b: i64) -> Battle {
    seed_battle_by(repo, id, side_a, side_b, 42).await
}

pub(crate) async fn seed_battle_by(
    repo: &Repository,
    id: i64,
    side_a: i64,
    side_b: i64,
    created_by: i64,
) -> Battle {
    for artist_id in [side_a, side_b] {
        let _ = repo
            .insert_artist(&Artist {
                id: ArtistId::new(artist_id),
                spotify_id: format!("sp-{}", artist_id),
                name: format!("Artist {}", artist_id),
            })
            .await;
    }

    let battle = Battle {
        id: BattleId::new(id),
        battle_type: 0,
        status: 0,
        side_a_id: ArtistId::new(side_a),
        side_b_id: ArtistId::new(side_b),
        amount_a: Amount::from(100),
        amount_b: Amount::from(250),
        total: Amount::from(350),
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        created_by: UserId::new(created_by),
    };
    repo.insert_battle(&battle).await.expect("insert battle");
    battle
}

pub(crate) async fn seed_position(
    repo: &Repository,
    id: i64,
    battle_id: i64,
    user_id: i64,
    amount: &str,
) {
    repo.insert_position(&Position {
        id: PositionId::new(id),
        battle_id: BattleId::new(battle_id),
        user_id: UserId::new(user_id),
        side: None,
        amount: Amount::from_str_canonical(amount).unwrap(),
    })
    .await
    .expect("insert position");
}
