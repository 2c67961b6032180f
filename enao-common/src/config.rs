//! Data-directory resolution
//!
//! The database file and the CSV snapshot both live under one data
//! directory, resolved with the following priority order:
//! 1. Command-line argument (highest priority)
//! 2. `ENAO_DATA_DIR` environment variable
//! 3. `data_dir` key in the user config file (`<config>/enao/config.toml`)
//! 4. OS-dependent local data directory (fallback)

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ENAO_DATA_DIR";

/// File name of the SQLite store inside the data directory.
pub const DB_FILE_NAME: &str = "enao.db";

/// File name of the CSV snapshot inside the data directory.
pub const CSV_FILE_NAME: &str = "enao-genres.csv";

/// Resolve the data directory following the priority order above.
pub fn resolve_data_dir(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = data_dir_from_config_file() {
        return path;
    }

    // Priority 4: OS-dependent default
    default_data_dir()
}

/// Probe the user config file for a `data_dir` key. Any missing or
/// unreadable layer just falls through to the next tier.
fn data_dir_from_config_file() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join("enao").join("config.toml");
    let content = std::fs::read_to_string(config_path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    value
        .get("data_dir")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("enao"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Path of the SQLite database inside the data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE_NAME)
}

/// Path of the CSV snapshot inside the data directory.
pub fn csv_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CSV_FILE_NAME)
}

/// Create the data directory if it does not exist yet.
pub fn ensure_data_dir(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir).map_err(|e| {
        Error::Config(format!(
            "cannot create data directory {}: {}",
            data_dir.display(),
            e
        ))
    })
}
