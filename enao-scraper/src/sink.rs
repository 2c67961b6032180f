//! Batch persistence sinks
//!
//! A completed batch goes to every configured sink; the sinks are
//! independent, so the CSV snapshot still lands when the database is
//! down and vice versa.

use async_trait::async_trait;
use enao_common::Genre;
use sqlx::SqlitePool;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Persistence failed after a successful extraction. Surfaced to the
/// cycle driver; the in-memory batch stays intact.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("database write failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepts one completed batch of genre records.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Sink label for cycle logging.
    fn name(&self) -> &'static str;

    async fn insert_batch(&self, records: &[Genre]) -> Result<(), SinkError>;
}

/// Replaces the `genre` table contents with the batch, atomically.
///
/// The core keeps no cross-cycle identity, so each cycle's batch is a
/// full snapshot; replacing wholesale inside one transaction means a
/// reader never observes a half-written cycle.
pub struct DbSink {
    pool: SqlitePool,
}

impl DbSink {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistenceSink for DbSink {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn insert_batch(&self, records: &[Genre]) -> Result<(), SinkError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM genre").execute(&mut *tx).await?;
        for genre in records {
            sqlx::query(
                "INSERT INTO genre (genre_name, preview_url, preview_track, color, top_pixel, left_pixel, font_size) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&genre.genre_name)
            .bind(&genre.preview_url)
            .bind(&genre.preview_track)
            .bind(&genre.color)
            .bind(genre.top_pixel)
            .bind(genre.left_pixel)
            .bind(genre.font_size)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(rows = records.len(), "genre table replaced");
        Ok(())
    }
}

/// Writes the batch as the seven-column CSV snapshot file.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PersistenceSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn insert_batch(&self, records: &[Genre]) -> Result<(), SinkError> {
        let text = enao_common::csv::genres_to_string(records);
        tokio::fs::write(&self.path, text).await?;
        debug!(path = %self.path.display(), rows = records.len(), "csv snapshot written");
        Ok(())
    }
}
