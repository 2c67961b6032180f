//! Inline style-text parsing
//!
//! Each genre element carries its placement as inline CSS, e.g.
//! `color: #9bb2e1; top: 1485px; left: 6455px; font-size: 112%;`.
//! Keys are normalized to the snake_case column names of the record
//! schema and values lose their unit suffix.

use crate::extract::ExtractError;

/// Parse raw inline-style text into normalized `(key, value)` fields.
///
/// The page terminates every style string with `;`, so the last split
/// segment is always empty and is dropped unconditionally. A style
/// string without the trailing delimiter therefore loses its final
/// field; this matches the source format and is pinned by tests, so a
/// change here is a deliberate behavior change, not a cleanup.
///
/// Unknown properties are kept under their normalized name; dropping
/// them is the record builder's call, not the parser's.
pub fn parse_style(style_text: &str) -> Result<Vec<(String, String)>, ExtractError> {
    let segments: Vec<&str> = style_text.split(';').collect();
    let mut fields = Vec::with_capacity(segments.len().saturating_sub(1));

    for segment in &segments[..segments.len() - 1] {
        let (key, value) = segment.split_once(':').ok_or_else(|| {
            ExtractError::MalformedField {
                segment: segment.trim().to_string(),
            }
        })?;
        fields.push((normalize_key(key), normalize_value(value)));
    }

    Ok(fields)
}

/// Trim, lowercase, hyphens to underscores; the two bare placement
/// properties get the `_pixel` suffix of the record schema.
fn normalize_key(key: &str) -> String {
    let key = key.trim().to_ascii_lowercase().replace('-', "_");
    match key.as_str() {
        "top" => "top_pixel".to_string(),
        "left" => "left_pixel".to_string(),
        _ => key,
    }
}

/// Trim, then strip at most one trailing `px` or `%` unit suffix.
fn normalize_value(value: &str) -> String {
    let value = value.trim();
    value
        .strip_suffix("px")
        .or_else(|| value.strip_suffix('%'))
        .unwrap_or(value)
        .to_string()
}
