//! Pure builders mapping chart requests onto [`ChartOption`]s.

use chartust_common::color::pick_grid_color;
use chartust_common::types::{ChartSeries, LineChartRequest, StackedAreaChartRequest};

use crate::schema::{
    AreaStyle, Axis, ChartOption, Legend, LineColor, LineStyleWrapper, Series, SeriesLineStyle,
    TextStyle, Title, Tooltip,
};

/// Stack group shared by every stacked-area layer.
const STACK_GROUP: &str = "total";

/// Smoothing factor applied to all plotted lines.
const LINE_SMOOTHNESS: f64 = 0.3;

/// Builds the option for a single-series line chart.
///
/// Exactly one series: 2px stroke in the series color, smoothed, no point
/// markers.
#[must_use]
pub fn line_chart_option(request: &LineChartRequest) -> ChartOption {
    let mut option = base_option(&request.label, &request.axis_color);
    option.series = vec![plain_series(&request.line, None, 2)];
    option
}

/// Builds the option for a stacked-area chart.
///
/// One filled layer per input series, all sharing one stack group, stacked
/// in input order, 1px strokes, smoothed, no point markers.
#[must_use]
pub fn stacked_area_chart_option(request: &StackedAreaChartRequest) -> ChartOption {
    let mut option = base_option(&request.label, &request.axis_color);
    option.series = request
        .areas
        .iter()
        .map(|area| {
            plain_series(
                area,
                Some(AreaStyle {
                    color: area.color.clone(),
                }),
                1,
            )
        })
        .collect();
    option
}

/// Shared scaffolding: transparent background, no animation, time x-axis,
/// value y-axis named after the chart label, everything tinted by the axis
/// color, gridlines by contrast.
fn base_option(label: &str, axis_color: &str) -> ChartOption {
    let grid_color = pick_grid_color(axis_color);

    ChartOption {
        background_color: "transparent".into(),
        title: Title {
            text: label.into(),
            text_style: text_style(axis_color),
        },
        legend: Legend {
            text_style: text_style(axis_color),
        },
        tooltip: Tooltip {
            trigger: "axis".into(),
        },
        x_axis: axis("time", "Time", axis_color, grid_color),
        y_axis: axis("value", label, axis_color, grid_color),
        animation: false,
        series: Vec::new(),
    }
}

fn axis(kind: &str, name: &str, axis_color: &str, grid_color: &str) -> Axis {
    Axis {
        kind: kind.into(),
        name: name.into(),
        name_text_style: text_style(axis_color),
        axis_line: line_style_wrapper(axis_color),
        axis_label: text_style(axis_color),
        split_line: line_style_wrapper(grid_color),
    }
}

fn plain_series(series: &ChartSeries, area_style: Option<AreaStyle>, width: u32) -> Series {
    let stack = area_style.as_ref().map(|_| STACK_GROUP.into());
    Series {
        name: series.label.clone(),
        kind: "line".into(),
        stack,
        area_style,
        data: series
            .points
            .iter()
            .map(|p| (p.x.timestamp_millis(), p.y))
            .collect(),
        line_style: SeriesLineStyle {
            color: series.color.clone(),
            width,
        },
        item_style: LineColor {
            color: series.color.clone(),
        },
        show_symbol: false,
        smooth: LINE_SMOOTHNESS,
    }
}

fn text_style(color: &str) -> TextStyle {
    TextStyle {
        color: color.into(),
    }
}

fn line_style_wrapper(color: &str) -> LineStyleWrapper {
    LineStyleWrapper {
        line_style: LineColor {
            color: color.into(),
        },
    }
}
