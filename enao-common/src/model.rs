//! Canonical genre record

use serde::{Deserialize, Serialize};

/// One entry of the genre taxonomy: name, preview metadata, and the
/// spatial placement the map page assigns it.
///
/// Constructed in one step from validated inputs and immutable
/// afterwards; a record with any field unresolved is never built (the
/// builder rejects the element instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Genre {
    /// Display text of the map element, verbatim.
    pub genre_name: String,
    /// Preview audio link; empty when the element carries none.
    pub preview_url: String,
    /// Example track title, with the page's "e.g. " prefix stripped.
    pub preview_track: String,
    /// CSS color of the element.
    pub color: String,
    /// Vertical placement on the map, in pixels.
    pub top_pixel: i64,
    /// Horizontal placement on the map, in pixels.
    pub left_pixel: i64,
    /// Font size of the element (the page expresses it in percent).
    pub font_size: i64,
}
