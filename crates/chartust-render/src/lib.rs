//! # chartust-render
//!
//! Renderer implementations behind the [`ChartRenderer`] capability trait:
//!
//! - [`service::ServiceRenderer`] delegates to a containerized ECharts
//!   render service (start, health-poll, POST, teardown).
//! - [`local::LocalRenderer`] draws the chart in-process with plotters.
//!
//! Both produce the same output shape: a PNG wrapped in a base64 data URL.

pub mod local;
pub mod service;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chartust_common::error::Result;
use chartust_common::types::{LineChartRequest, StackedAreaChartRequest};

/// Capability interface for turning chart requests into images.
///
/// Implementations take `&mut self` because the service-backed renderer
/// mutates its lifecycle state on first use. Callers are expected to be
/// single-threaded request handlers; no internal locking is provided.
pub trait ChartRenderer {
    /// Renders a single-series line chart to a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be brought up or the render
    /// itself fails.
    fn render_line_chart(&mut self, request: &LineChartRequest) -> Result<String>;

    /// Renders a stacked-area chart to a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be brought up or the render
    /// itself fails.
    fn render_stacked_area_chart(&mut self, request: &StackedAreaChartRequest) -> Result<String>;
}

/// Wraps PNG bytes in a `data:image/png;base64,…` URL.
#[must_use]
pub fn png_data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}
