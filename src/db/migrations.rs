//! Database initialization and schema setup.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open (creating if needed) the SQLite database and apply the schema.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    info!("Database ready at {}", db_path);
    Ok(pool)
}

/// Apply `schema.sql`; every statement is `IF NOT EXISTS`.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema_sql = include_str!("schema.sql");

    let mut applied = 0usize;
    for statement in schema_sql.split(';').map(str::trim) {
        if statement.is_empty() {
            continue;
        }
        sqlx::query(statement).execute(pool).await?;
        applied += 1;
    }

    info!("Applied {} schema statements", applied);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_path(dir: &TempDir) -> String {
        dir.path().join("battles.db").to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_init_db_creates_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir);
        let pool = init_db(&path).await.expect("init_db failed");
        assert!(Path::new(&path).exists());

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("query failed");
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["artists", "battles", "positions"]);
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&db_path(&temp_dir)).await.expect("init_db failed");

        run_migrations(&pool)
            .await
            .expect("second migration run failed");
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&db_path(&temp_dir)).await.expect("init_db failed");

        let result: (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }
}
