//! Scatter + density rendering of the genre space
//!
//! The map page lays genres out on a 2-D plane (denser/spikier on the
//! x axis, organic/mechanical on the y axis, origin at the top left).
//! The plot mirrors that layout: one colored point per genre, sized by
//! its font size, over a blue density shading of the point cloud, with
//! a handful of well-known genres labeled for orientation.

use std::path::Path;

use anyhow::Result;
use enao_common::Genre;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

/// Genres labeled on the plot, matching the map's best-known regions.
const LABELED_GENRES: [&str; 11] = [
    "metal",
    "pop rock",
    "rock",
    "funk",
    "jazz",
    "rap",
    "pop",
    "folk",
    "focus",
    "classical",
    "techno",
];

const PLOT_SIZE: (u32, u32) = (1600, 1280);
const DENSITY_BINS: (usize, usize) = (64, 48);
const FALLBACK_COLOR: RGBColor = RGBColor(120, 120, 120);

/// Render the genre batch to an SVG file.
pub fn render(genres: &[Genre], output: &Path) -> Result<()> {
    anyhow::ensure!(!genres.is_empty(), "nothing to plot: no genre records");

    let (x_range, y_range) = bounds(genres);

    let root = SVGBackend::new(output, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Every Noise at Once - Spotify Genres", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        // The page origin is top-left, so the y axis runs downwards.
        .build_cartesian_2d(
            x_range.0..x_range.1,
            y_range.1..y_range.0,
        )?;

    chart
        .configure_mesh()
        .x_desc("← Denser & Atmospheric, Spikier & Bouncier →")
        .y_desc("← Organic, Mechanical & Electric →")
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    draw_density(&mut chart, genres, x_range, y_range)?;
    draw_scatter(&mut chart, genres)?;
    draw_labels(&mut chart, genres)?;

    root.present()?;
    Ok(())
}

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Blue shading from a smoothed 2-D histogram of the point positions.
fn draw_density(
    chart: &mut Chart<'_, '_>,
    genres: &[Genre],
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<()> {
    let grid = density_grid(genres, x_range, y_range);
    let (nx, ny) = DENSITY_BINS;
    let dx = (x_range.1 - x_range.0) / nx as f64;
    let dy = (y_range.1 - y_range.0) / ny as f64;

    chart.draw_series((0..nx * ny).filter(|i| grid[*i] > 0.01).map(|i| {
        let (gx, gy) = (i % nx, i / nx);
        let x0 = x_range.0 + gx as f64 * dx;
        let y0 = y_range.0 + gy as f64 * dy;
        Rectangle::new(
            [(x0, y0), (x0 + dx, y0 + dy)],
            BLUE.mix(0.3 * grid[i]).filled(),
        )
    }))?;
    Ok(())
}

fn draw_scatter(chart: &mut Chart<'_, '_>, genres: &[Genre]) -> Result<()> {
    chart.draw_series(genres.iter().map(|genre| {
        let color = parse_color(&genre.color).unwrap_or(FALLBACK_COLOR);
        Circle::new(
            (genre.left_pixel as f64, genre.top_pixel as f64),
            point_radius(genre.font_size),
            color.mix(0.6).filled(),
        )
    }))?;
    Ok(())
}

fn draw_labels(chart: &mut Chart<'_, '_>, genres: &[Genre]) -> Result<()> {
    chart.draw_series(
        genres
            .iter()
            .filter(|genre| LABELED_GENRES.contains(&genre.genre_name.as_str()))
            .map(|genre| {
                Text::new(
                    genre.genre_name.clone(),
                    (genre.left_pixel as f64, genre.top_pixel as f64),
                    ("sans-serif", label_size(genre.font_size))
                        .into_font()
                        .color(&BLACK),
                )
            }),
    )?;
    Ok(())
}

/// Data bounds with a 5% pad (and a minimum extent so a degenerate
/// single-point batch still yields a drawable range).
fn bounds(genres: &[Genre]) -> ((f64, f64), (f64, f64)) {
    let xs: Vec<f64> = genres.iter().map(|g| g.left_pixel as f64).collect();
    let ys: Vec<f64> = genres.iter().map(|g| g.top_pixel as f64).collect();
    (padded(&xs), padded(&ys))
}

fn padded(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

/// Grid-binned point counts with one 3x3 smoothing pass, normalized to
/// the peak cell. Row-major, `DENSITY_BINS.0` columns.
fn density_grid(genres: &[Genre], x_range: (f64, f64), y_range: (f64, f64)) -> Vec<f64> {
    let (nx, ny) = DENSITY_BINS;
    let mut counts = vec![0.0f64; nx * ny];

    for genre in genres {
        let gx = bin(genre.left_pixel as f64, x_range, nx);
        let gy = bin(genre.top_pixel as f64, y_range, ny);
        counts[gy * nx + gx] += 1.0;
    }

    let mut smoothed = vec![0.0f64; nx * ny];
    for gy in 0..ny {
        for gx in 0..nx {
            let mut sum = 0.0;
            let mut n = 0.0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let (sx, sy) = (gx as i64 + dx, gy as i64 + dy);
                    if sx >= 0 && sy >= 0 && (sx as usize) < nx && (sy as usize) < ny {
                        sum += counts[sy as usize * nx + sx as usize];
                        n += 1.0;
                    }
                }
            }
            smoothed[gy * nx + gx] = sum / n;
        }
    }

    let peak = smoothed.iter().copied().fold(0.0f64, f64::max);
    if peak > 0.0 {
        for v in &mut smoothed {
            *v /= peak;
        }
    }
    smoothed
}

fn bin(value: f64, range: (f64, f64), bins: usize) -> usize {
    let span = range.1 - range.0;
    let relative = ((value - range.0) / span).clamp(0.0, 1.0);
    ((relative * bins as f64) as usize).min(bins - 1)
}

/// `#rrggbb` or `#rgb` hex color; anything else is the caller's
/// fallback.
fn parse_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

/// Point radius from the font-size percentage.
fn point_radius(font_size: i64) -> i32 {
    ((font_size as f64 * 0.05).round() as i32).clamp(2, 10)
}

/// Label size from the font-size percentage, like the map's own scaled
/// labels.
fn label_size(font_size: i64) -> i32 {
    ((font_size as f64 * 0.2).round() as i32).clamp(8, 28)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn genre(name: &str, left: i64, top: i64) -> Genre {
        Genre {
            genre_name: name.to_string(),
            preview_url: String::new(),
            preview_track: String::new(),
            color: "#9bb2e1".to_string(),
            top_pixel: top,
            left_pixel: left,
            font_size: 100,
        }
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_color("#9bb2e1"), Some(RGBColor(0x9b, 0xb2, 0xe1)));
        assert_eq!(parse_color("#fff"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_color("salmon"), None);
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn non_ascii_colors_are_rejected_not_panicking() {
        // Free-text column: a multibyte "hex" body must fall through to
        // the caller's fallback, not hit a char-boundary slice.
        assert_eq!(parse_color("#€"), None);
        assert_eq!(parse_color("#ééé"), None);
        assert_eq!(parse_color("#ab€"), None);
    }

    #[test]
    fn point_radius_is_clamped() {
        assert_eq!(point_radius(100), 5);
        assert_eq!(point_radius(10), 2);
        assert_eq!(point_radius(500), 10);
    }

    #[test]
    fn density_grid_is_normalized_to_peak() {
        let genres: Vec<Genre> = (0..10).map(|i| genre("x", i % 3, i % 2)).collect();
        let grid = density_grid(&genres, (-1.0, 4.0), (-1.0, 3.0));
        let peak = grid.iter().copied().fold(0.0f64, f64::max);
        assert!((peak - 1.0).abs() < 1e-9);
        assert!(grid.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn out_of_range_values_clamp_to_edge_bins() {
        assert_eq!(bin(-100.0, (0.0, 10.0), 8), 0);
        assert_eq!(bin(100.0, (0.0, 10.0), 8), 7);
    }

    #[test]
    fn render_writes_an_svg_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("plot.svg");
        let genres = vec![
            genre("pop", 6455, 1485),
            genre("jazz", 490, 871),
            genre("metal", 100, 2000),
        ];

        render(&genres, &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("<?xml") || text.contains("<svg"));
        assert!(text.contains("jazz"));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(render(&[], &temp.path().join("plot.svg")).is_err());
    }
}
