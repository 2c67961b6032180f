//! enao-scraper binary
//!
//! Periodically scrapes the genre map page and persists each snapshot
//! to the SQLite store and the CSV file under the data directory. Runs
//! forever on a fixed interval by default; `--once` runs a single cycle
//! (the automated/CI mode).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use enao_common::config;
use enao_scraper::cycle::ScrapeCycle;
use enao_scraper::extract::{ConcurrentExtractor, DEFAULT_WORKERS};
use enao_scraper::sink::{CsvSink, DbSink, PersistenceSink};
use enao_scraper::source::{EveryNoiseSource, DEFAULT_PAGE_URL};

#[derive(Parser, Debug)]
#[command(name = "enao-scraper", version, about = "Genre taxonomy scraper for the Every Noise at Once map")]
struct Args {
    /// Genre map page to scrape.
    #[arg(long, env = "ENAO_PAGE_URL", default_value = DEFAULT_PAGE_URL)]
    page_url: String,

    /// Data directory holding the database and CSV snapshot.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seconds to sleep between cycles.
    #[arg(long, default_value_t = 300)]
    interval_secs: u64,

    /// Run a single cycle and exit.
    #[arg(long)]
    once: bool,

    /// Extraction worker-pool size.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting enao-scraper v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_dir = config::resolve_data_dir(args.data_dir.as_deref());
    config::ensure_data_dir(&data_dir)?;
    info!("Data directory: {}", data_dir.display());

    let source = EveryNoiseSource::new(args.page_url.as_str())?;

    // The database is optional at runtime: a failed init is logged and
    // the cycle keeps writing the CSV snapshot.
    let mut sinks: Vec<Box<dyn PersistenceSink>> = Vec::new();
    match enao_common::db::init_database(&config::database_path(&data_dir)).await {
        Ok(pool) => sinks.push(Box::new(DbSink::new(pool))),
        Err(e) => error!(error = %e, "database unavailable, continuing with csv only"),
    }
    sinks.push(Box::new(CsvSink::new(config::csv_path(&data_dir))));

    let cycle = ScrapeCycle::new(ConcurrentExtractor::new(args.concurrency), sinks);

    if args.once {
        cycle.run_once(&source).await?;
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs(args.interval_secs.max(1)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        // A failed cycle aborts this pass only; the next interval
        // starts a fresh one.
        if let Err(e) = cycle.run_once(&source).await {
            error!(error = %e, "scrape cycle failed");
        }
    }
}
