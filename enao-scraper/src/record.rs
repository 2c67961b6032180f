//! Genre record assembly
//!
//! Combines one element's readable attributes with its parsed style
//! fields into a canonical [`Genre`]. Construction is all-or-nothing:
//! an element that cannot fill every required field yields an error,
//! never a partial record.

use enao_common::Genre;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::ExtractError;
use crate::source::GenreElement;

/// The page prefixes each element's title with "e.g. " before the
/// example track. Case-sensitive on purpose: "E.G." is left alone.
static EXAMPLE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^e\.g\.\s*").unwrap());

/// Build one canonical record from one element.
///
/// Required fields: non-empty display text plus `color`, `top_pixel`,
/// `left_pixel` and `font_size` from the style text. `preview_url` and
/// the title are taken as-is and may be empty.
pub fn build_genre(element: &GenreElement) -> Result<Genre, ExtractError> {
    let fields = crate::style::parse_style(&element.style_text)?;

    let mut color = None;
    let mut top_pixel = None;
    let mut left_pixel = None;
    let mut font_size = None;

    for (key, value) in fields {
        match key.as_str() {
            "color" => color = Some(value),
            "top_pixel" => top_pixel = Some(parse_int("top_pixel", value)?),
            "left_pixel" => left_pixel = Some(parse_int("left_pixel", value)?),
            "font_size" => font_size = Some(parse_int("font_size", value)?),
            // Other style properties are parsed but not part of the record.
            _ => {}
        }
    }

    let mut missing = Vec::new();
    if element.display_text.trim().is_empty() {
        missing.push("genre_name");
    }
    if color.is_none() {
        missing.push("color");
    }
    if top_pixel.is_none() {
        missing.push("top_pixel");
    }
    if left_pixel.is_none() {
        missing.push("left_pixel");
    }
    if font_size.is_none() {
        missing.push("font_size");
    }

    if let (true, Some(color), Some(top_pixel), Some(left_pixel), Some(font_size)) =
        (missing.is_empty(), color, top_pixel, left_pixel, font_size)
    {
        return Ok(Genre {
            genre_name: element.display_text.clone(),
            preview_url: element.preview_url.clone(),
            preview_track: EXAMPLE_PREFIX
                .replace(&element.title_text, "")
                .into_owned(),
            color,
            top_pixel,
            left_pixel,
            font_size,
        });
    }

    Err(ExtractError::IncompleteRecord {
        missing: missing.join(", "),
    })
}

fn parse_int(key: &'static str, value: String) -> Result<i64, ExtractError> {
    value
        .parse::<i64>()
        .map_err(|_| ExtractError::NumericParse { key, value })
}
