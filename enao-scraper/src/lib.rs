//! enao-scraper: extraction pipeline for the Every Noise at Once genre map
//!
//! The map page encodes its whole taxonomy as DOM elements whose inline
//! style carries color and placement. One scrape cycle fetches the
//! page, turns every element into a canonical [`enao_common::Genre`]
//! record with a bounded worker pool, and hands the batch to the
//! configured persistence sinks (SQLite table and CSV snapshot).

pub mod cycle;
pub mod extract;
pub mod record;
pub mod sink;
pub mod source;
pub mod style;
