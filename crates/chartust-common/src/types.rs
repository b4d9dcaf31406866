//! Domain data model for chart requests.
//!
//! The serde field names follow the wire shape the render service expects
//! (`axisColor`, `line`, `areas`), so a request struct serializes directly
//! into the render payload.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped sample in a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Sample timestamp.
    pub x: DateTime<Utc>,
    /// Sample value.
    pub y: f64,
}

/// One named, colored series of timestamped points.
///
/// Points are insertion-ordered; `x` is expected to be monotonically
/// non-decreasing but is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series label shown in the legend.
    pub label: String,
    /// Series color as a hex string (`#RGB` or `#RRGGBB`).
    pub color: String,
    /// Ordered samples.
    pub points: Vec<DataPoint>,
}

/// Request to render a single-series line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartRequest {
    /// Overall chart label (title and y-axis name).
    pub label: String,
    /// Color applied to title, legend, and axis text.
    pub axis_color: String,
    /// The single series to plot.
    pub line: ChartSeries,
}

/// Request to render a stacked-area chart.
///
/// Stacking order is the sequence order of `areas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedAreaChartRequest {
    /// Overall chart label (title and y-axis name).
    pub label: String,
    /// Color applied to title, legend, and axis text.
    pub axis_color: String,
    /// Series to stack, bottom first.
    pub areas: Vec<ChartSeries>,
}

/// Identifier attached to each render request for traceability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a request ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh request ID of the form `render-<epoch_ms>-<suffix>`.
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("render-{millis}-{}", &suffix[..7]))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_series() -> ChartSeries {
        ChartSeries {
            label: "cpu".into(),
            color: "#ff0000".into(),
            points: vec![
                DataPoint {
                    x: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid timestamp"),
                    y: 1.0,
                },
                DataPoint {
                    x: Utc.with_ymd_and_hms(2026, 1, 1, 0, 1, 0).single().expect("valid timestamp"),
                    y: 2.5,
                },
            ],
        }
    }

    #[test]
    fn line_request_serializes_with_camel_case_keys() {
        let request = LineChartRequest {
            label: "CPU".into(),
            axis_color: "#cccccc".into(),
            line: sample_series(),
        };
        let json = serde_json::to_value(&request).expect("serialize failed");
        assert!(json.get("axisColor").is_some());
        assert!(json.get("line").is_some());
        assert!(json.get("axis_color").is_none());
    }

    #[test]
    fn stacked_request_round_trips() {
        let request = StackedAreaChartRequest {
            label: "Memory".into(),
            axis_color: "#333".into(),
            areas: vec![sample_series(), sample_series()],
        };
        let json = serde_json::to_string(&request).expect("serialize failed");
        let back: StackedAreaChartRequest =
            serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, request);
    }

    #[test]
    fn request_id_has_render_prefix() {
        let id = RequestId::generate();
        assert!(id.as_str().starts_with("render-"));
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
