//! Database initialization
//!
//! Creates the database file and the `genre` table on first use;
//! reopening an existing database is a no-op beyond the pragmas.

use crate::{Error, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Initialize the database connection and create the schema if needed.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL lets the visualizer read while a scrape cycle writes.
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_genre_table(&pool).await?;

    Ok(pool)
}

/// Open an existing database read-only (visualizer side).
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "database file {}",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect(&db_url)
        .await?;

    Ok(pool)
}

/// Schema of one scrape snapshot. All columns textual except the three
/// integer pixel/size fields; the table carries no cross-cycle identity.
async fn create_genre_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS genre (
            genre_name TEXT NOT NULL,
            preview_url TEXT NOT NULL DEFAULT '',
            preview_track TEXT NOT NULL DEFAULT '',
            color TEXT NOT NULL,
            top_pixel INTEGER NOT NULL,
            left_pixel INTEGER NOT NULL,
            font_size INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
