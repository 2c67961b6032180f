//! enao-viz: density map of the scraped genre space
//!
//! Reads the `genre` table written by enao-scraper (falling back to the
//! CSV snapshot when the database is unavailable) and renders the
//! spatial layout of the taxonomy as an SVG scatter/density plot.

mod plot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use enao_common::{config, Genre};

#[derive(Parser, Debug)]
#[command(name = "enao-viz", version, about = "Render the genre map as an SVG density plot")]
struct Args {
    /// Data directory holding the database and CSV snapshot.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output file; defaults to plot.svg inside the data directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting enao-viz v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let data_dir = config::resolve_data_dir(args.data_dir.as_deref());

    let genres = load_genres(&data_dir).await?;
    let output = args.output.unwrap_or_else(|| data_dir.join("plot.svg"));

    plot::render(&genres, &output)?;
    info!("Wrote {}", output.display());

    Ok(())
}

/// Database first, CSV snapshot as fallback: the same two places the
/// scraper persists to.
async fn load_genres(data_dir: &Path) -> Result<Vec<Genre>> {
    match load_from_db(&config::database_path(data_dir)).await {
        Ok(genres) if !genres.is_empty() => {
            info!(genre_count = genres.len(), "loaded genres from database");
            return Ok(genres);
        }
        Ok(_) => warn!("genre table is empty, falling back to csv"),
        Err(e) => warn!(error = %e, "database unavailable, falling back to csv"),
    }

    let csv_path = config::csv_path(data_dir);
    let text = std::fs::read_to_string(&csv_path)
        .with_context(|| format!("reading {}", csv_path.display()))?;
    let genres = enao_common::csv::parse_genres(&text)?;
    info!(genre_count = genres.len(), "loaded genres from csv snapshot");
    Ok(genres)
}

async fn load_from_db(db_path: &Path) -> enao_common::Result<Vec<Genre>> {
    let pool = enao_common::db::connect_readonly(db_path).await?;
    let genres = sqlx::query_as(
        "SELECT genre_name, preview_url, preview_track, color, top_pixel, left_pixel, font_size \
         FROM genre",
    )
    .fetch_all(&pool)
    .await?;
    Ok(genres)
}
