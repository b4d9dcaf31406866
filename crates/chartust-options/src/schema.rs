//! Serializable subset of the ECharts option surface used by these charts.
//!
//! Field names serialize in camelCase to match what the render service
//! expects. Only the pieces the telemetry charts actually set are modeled.

use serde::Serialize;

/// A complete chart option ready to be sent to the render service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    /// Canvas background; always `"transparent"` for report embedding.
    pub background_color: String,
    /// Chart title block.
    pub title: Title,
    /// Legend styling.
    pub legend: Legend,
    /// Tooltip behavior.
    pub tooltip: Tooltip,
    /// Time-typed x-axis.
    pub x_axis: Axis,
    /// Value-typed y-axis.
    pub y_axis: Axis,
    /// Whether entry animation is enabled; disabled for static renders.
    pub animation: bool,
    /// Plotted series, in stacking order.
    pub series: Vec<Series>,
}

/// Chart title text and styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    /// Title text.
    pub text: String,
    /// Title text color.
    pub text_style: TextStyle,
}

/// Legend styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend text color.
    pub text_style: TextStyle,
}

/// Tooltip configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    /// Trigger mode; `"axis"` shows all series at the hovered x.
    pub trigger: String,
}

/// Text color wrapper used by titles, legends, and axis labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    /// CSS color string.
    pub color: String,
}

/// A chart axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    /// Axis type: `"time"` or `"value"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Axis name shown alongside the axis.
    pub name: String,
    /// Axis name color.
    pub name_text_style: TextStyle,
    /// Axis line color.
    pub axis_line: LineStyleWrapper,
    /// Tick label color.
    pub axis_label: TextStyle,
    /// Gridline (split line) color.
    pub split_line: LineStyleWrapper,
}

/// Wrapper for the nested `{ lineStyle: { color } }` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyleWrapper {
    /// Nested line style.
    pub line_style: LineColor,
}

/// A bare line color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineColor {
    /// CSS color string.
    pub color: String,
}

/// Stroke style for a plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLineStyle {
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub width: u32,
}

/// Fill style for stacked-area layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaStyle {
    /// Fill color.
    pub color: String,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Series name shown in the legend.
    pub name: String,
    /// Series type; always `"line"` (areas are lines with a fill).
    #[serde(rename = "type")]
    pub kind: String,
    /// Stack group identifier; series sharing a group are stacked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Fill style; present only for stacked-area layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_style: Option<AreaStyle>,
    /// `[epoch_ms, value]` pairs.
    pub data: Vec<(i64, f64)>,
    /// Stroke style.
    pub line_style: SeriesLineStyle,
    /// Marker color (matches the stroke).
    pub item_style: LineColor,
    /// Whether point markers are drawn.
    pub show_symbol: bool,
    /// Smoothing factor for the line interpolation.
    pub smooth: f64,
}
