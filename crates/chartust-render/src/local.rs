//! In-process chart renderer built on plotters.
//!
//! Functionally equivalent to the service render step but without any
//! lifecycle: a library call synchronously produces the PNG. No polling,
//! no container, no network.
//!
//! The bitmap backend has no alpha channel, so the canvas is filled white
//! instead of transparent; everything else follows the same chart shape as
//! the service renderer (1000x500, axis-colored text, contrast gridlines,
//! no point markers).

use chartust_common::color::{GridTone, Rgb, grid_tone, parse_hex_color};
use chartust_common::constants::{CHART_HEIGHT, CHART_WIDTH};
use chartust_common::error::{ChartustError, Result};
use chartust_common::types::{
    ChartSeries, DataPoint, LineChartRequest, StackedAreaChartRequest,
};
use chrono::{DateTime, Utc};
use plotters::prelude::*;

use crate::{ChartRenderer, png_data_url};

/// Fallback stroke color for unparsable series colors.
const FALLBACK_SERIES_COLOR: RGBColor = RGBColor(128, 128, 128);

/// One drawable layer: points already in final (possibly cumulated) form.
struct Layer {
    label: String,
    color: RGBColor,
    points: Vec<(DateTime<Utc>, f64)>,
    filled: bool,
    stroke_width: u32,
}

/// Renderer that draws charts in-process with plotters.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRenderer;

impl LocalRenderer {
    /// Creates a new in-process renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChartRenderer for LocalRenderer {
    fn render_line_chart(&mut self, request: &LineChartRequest) -> Result<String> {
        let layers = vec![layer(&request.line, false, 2)];
        let png = draw_png(&request.label, &request.axis_color, &layers)?;
        Ok(png_data_url(&png))
    }

    fn render_stacked_area_chart(&mut self, request: &StackedAreaChartRequest) -> Result<String> {
        // Cumulate in input order, then draw the tallest layer first so
        // every band below it stays visible.
        let mut layers: Vec<Layer> = cumulate(&request.areas)
            .iter()
            .map(|series| layer(series, true, 1))
            .collect();
        layers.reverse();
        let png = draw_png(&request.label, &request.axis_color, &layers)?;
        Ok(png_data_url(&png))
    }
}

/// Converts a series into a drawable layer.
fn layer(series: &ChartSeries, filled: bool, stroke_width: u32) -> Layer {
    Layer {
        label: series.label.clone(),
        color: series_color(&series.color),
        points: series.points.iter().map(|p| (p.x, p.y)).collect(),
        filled,
        stroke_width,
    }
}

/// Replaces each series' values with the running stack totals, preserving
/// input order. Series of unequal length contribute to the totals only up
/// to their own length.
fn cumulate(areas: &[ChartSeries]) -> Vec<ChartSeries> {
    let mut totals: Vec<f64> = Vec::new();
    areas
        .iter()
        .map(|series| {
            let points = series
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    if totals.len() <= i {
                        totals.resize(i + 1, 0.0);
                    }
                    totals[i] += p.y;
                    DataPoint {
                        x: p.x,
                        y: totals[i],
                    }
                })
                .collect();
            ChartSeries {
                label: series.label.clone(),
                color: series.color.clone(),
                points,
            }
        })
        .collect()
}

/// Draws the layers onto a 1000x500 bitmap and returns the PNG bytes.
fn draw_png(label: &str, axis_color: &str, layers: &[Layer]) -> Result<Vec<u8>> {
    if layers.is_empty() {
        return Err(ChartustError::Drawing {
            message: "at least one series is required".into(),
        });
    }
    if layers.iter().any(|l| l.points.len() < 2) {
        return Err(ChartustError::Drawing {
            message: "at least two points per series are required".into(),
        });
    }

    let axis_rgb = series_color(axis_color);
    let grid = grid_style(axis_color);
    let (x_range, y_range) = data_bounds(layers);

    // plotters' bitmap backend encodes PNG only when given a path, so the
    // image goes through a temp file and is read back.
    let file = tempfile::Builder::new()
        .prefix("chartust-")
        .suffix(".png")
        .tempfile()
        .map_err(|e| ChartustError::Io {
            path: std::env::temp_dir(),
            source: e,
        })?;

    {
        let root = BitMapBackend::new(file.path(), (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(label, ("sans-serif", 28).into_font().color(&axis_rgb))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc(label)
            .axis_style(axis_rgb)
            .label_style(("sans-serif", 14).into_font().color(&axis_rgb))
            .bold_line_style(grid)
            .light_line_style(grid.mix(0.5))
            .draw()
            .map_err(drawing_error)?;

        for l in layers {
            let color = l.color;
            if l.filled {
                let anno = chart
                    .draw_series(
                        AreaSeries::new(l.points.iter().copied(), 0.0, color.filled())
                            .border_style(color.stroke_width(l.stroke_width)),
                    )
                    .map_err(drawing_error)?;
                let _ = anno.label(l.label.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
            } else {
                let anno = chart
                    .draw_series(LineSeries::new(
                        l.points.iter().copied(),
                        color.stroke_width(l.stroke_width),
                    ))
                    .map_err(drawing_error)?;
                let _ = anno.label(l.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
                });
            }
        }

        if layers.len() > 1 {
            chart
                .configure_series_labels()
                .label_font(("sans-serif", 14).into_font().color(&axis_rgb))
                .border_style(grid)
                .draw()
                .map_err(drawing_error)?;
        }

        root.present().map_err(drawing_error)?;
    }

    std::fs::read(file.path()).map_err(|e| ChartustError::Io {
        path: file.path().to_path_buf(),
        source: e,
    })
}

/// Computes padded axis bounds across all layers.
fn data_bounds(
    layers: &[Layer],
) -> (
    std::ops::Range<DateTime<Utc>>,
    std::ops::Range<f64>,
) {
    let points = layers.iter().flat_map(|l| l.points.iter());
    let mut x_min = DateTime::<Utc>::MAX_UTC;
    let mut x_max = DateTime::<Utc>::MIN_UTC;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if x_max <= x_min {
        x_max = x_min + chrono::Duration::seconds(1);
    }
    let spread = (y_max - y_min).max(1e-8);
    let padding = spread * 0.1;
    let y_lo = (y_min - padding).min(0.0);
    let y_hi = y_max + padding;

    (x_min..x_max, y_lo..y_hi)
}

/// Parses a series hex color, falling back to gray.
fn series_color(color: &str) -> RGBColor {
    parse_hex_color(color).map_or(FALLBACK_SERIES_COLOR, |Rgb { r, g, b }| RGBColor(r, g, b))
}

/// Translucent gridline style matching the service renderer's contrast rule.
fn grid_style(axis_color: &str) -> RGBAColor {
    match grid_tone(axis_color) {
        GridTone::Light => WHITE.mix(0.25),
        GridTone::Dark => BLACK.mix(0.15),
        GridTone::Neutral => FALLBACK_SERIES_COLOR.mix(0.2),
    }
}

/// Maps any plotters error to the workspace drawing error.
fn drawing_error<E: std::error::Error>(e: E) -> ChartustError {
    ChartustError::Drawing {
        message: e.to_string(),
    }
}
