//! Shared foundation for the enao workspace
//!
//! Carries everything both the scraper and the visualizer need: the
//! canonical [`Genre`] record, data-directory resolution, the SQLite
//! snapshot store, and the CSV snapshot codec.

pub mod config;
pub mod csv;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::Genre;
