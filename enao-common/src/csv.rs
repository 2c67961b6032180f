//! CSV snapshot codec
//!
//! Minimal quote-aware CSV for the seven-column genre snapshot: fields
//! containing the separator, quotes, or line breaks are double-quoted
//! with `""` escapes. Enough for round-tripping our own output; this is
//! not a general CSV implementation.

use crate::{Error, Genre, Result};
use std::mem::take;

/// Column order of the snapshot file, matching the `genre` table.
pub const COLUMNS: [&str; 7] = [
    "genre_name",
    "preview_url",
    "preview_track",
    "color",
    "top_pixel",
    "left_pixel",
    "font_size",
];

/// Serialize a batch to CSV text, header line first.
pub fn genres_to_string(genres: &[Genre]) -> String {
    let mut out = String::new();
    push_row(&mut out, COLUMNS.iter().map(|c| (*c).to_string()));
    for genre in genres {
        push_row(
            &mut out,
            [
                genre.genre_name.clone(),
                genre.preview_url.clone(),
                genre.preview_track.clone(),
                genre.color.clone(),
                genre.top_pixel.to_string(),
                genre.left_pixel.to_string(),
                genre.font_size.to_string(),
            ],
        );
    }
    out
}

/// Parse CSV text produced by [`genres_to_string`] back into records.
///
/// The header row is required and must match [`COLUMNS`] exactly.
pub fn parse_genres(text: &str) -> Result<Vec<Genre>> {
    let mut rows = parse_rows(text);
    if rows.is_empty() {
        return Err(Error::Csv("empty input: missing header row".to_string()));
    }
    let header = rows.remove(0);
    if header.len() != COLUMNS.len()
        || header.iter().map(String::as_str).ne(COLUMNS.iter().copied())
    {
        return Err(Error::Csv(format!("unexpected header: {:?}", header)));
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| genre_from_row(i + 2, row))
        .collect()
}

fn genre_from_row(line: usize, row: &[String]) -> Result<Genre> {
    if row.len() != COLUMNS.len() {
        return Err(Error::Csv(format!(
            "line {}: expected {} fields, got {}",
            line,
            COLUMNS.len(),
            row.len()
        )));
    }
    Ok(Genre {
        genre_name: row[0].clone(),
        preview_url: row[1].clone(),
        preview_track: row[2].clone(),
        color: row[3].clone(),
        top_pixel: parse_int(line, "top_pixel", &row[4])?,
        left_pixel: parse_int(line, "left_pixel", &row[5])?,
        font_size: parse_int(line, "font_size", &row[6])?,
    })
}

fn parse_int(line: usize, column: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        Error::Csv(format!(
            "line {}: column {} is not an integer: {:?}",
            line, column, value
        ))
    })
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

fn push_row<I: IntoIterator<Item = String>>(out: &mut String, cells: I) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        if needs_quotes(&cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&cell);
        }
    }
    out.push('\n');
}

/// Quote and CRLF tolerant row parser. Blank lines are skipped.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row: Vec<String> = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a final row that lacks the trailing newline.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}
