//! Integration tests for database initialization

use enao_common::db::{connect_readonly, init_database};
use enao_common::Genre;
use tempfile::TempDir;

fn genre(name: &str) -> Genre {
    Genre {
        genre_name: name.to_string(),
        preview_url: String::new(),
        preview_track: format!("{} example track", name),
        color: "#aabbcc".to_string(),
        top_pixel: 10,
        left_pixel: 20,
        font_size: 100,
    }
}

#[tokio::test]
async fn init_creates_database_file_and_genre_table() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("enao.db");

    let pool = init_database(&db_path).await.unwrap();
    assert!(db_path.exists());

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'genre'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn init_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("enao.db");

    let pool = init_database(&db_path).await.unwrap();
    let g = genre("pop");
    sqlx::query(
        "INSERT INTO genre (genre_name, preview_url, preview_track, color, top_pixel, left_pixel, font_size) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&g.genre_name)
    .bind(&g.preview_url)
    .bind(&g.preview_track)
    .bind(&g.color)
    .bind(g.top_pixel)
    .bind(g.left_pixel)
    .bind(g.font_size)
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    // Second init must keep existing rows intact.
    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genre")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn inserted_rows_round_trip_through_query_as() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("enao.db");
    let pool = init_database(&db_path).await.unwrap();

    let g = genre("jazz");
    sqlx::query(
        "INSERT INTO genre (genre_name, preview_url, preview_track, color, top_pixel, left_pixel, font_size) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&g.genre_name)
    .bind(&g.preview_url)
    .bind(&g.preview_track)
    .bind(&g.color)
    .bind(g.top_pixel)
    .bind(g.left_pixel)
    .bind(g.font_size)
    .execute(&pool)
    .await
    .unwrap();

    let rows: Vec<Genre> = sqlx::query_as(
        "SELECT genre_name, preview_url, preview_track, color, top_pixel, left_pixel, font_size FROM genre",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(rows, vec![g]);
}

#[tokio::test]
async fn connect_readonly_requires_existing_file() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("missing.db");

    let err = connect_readonly(&db_path).await.unwrap_err();
    assert!(matches!(err, enao_common::Error::NotFound(_)));
}
