//! System-wide constants shared by the renderers and the CLI.

use std::time::Duration;

/// Container image for the external chart-rendering service.
pub const RENDER_SERVICE_IMAGE: &str = "ghcr.io/getsentry/chartcuterie:latest";

/// Local port the render service listens on.
pub const RENDER_SERVICE_PORT: u16 = 9090;

/// Path the style-registry config is mounted at inside the container.
pub const CONTAINER_CONFIG_PATH: &str = "/config/chartConfig.js";

/// Style key for single-series line charts.
pub const STYLE_LINE: &str = "telemetry:line";

/// Style key for stacked-area charts.
pub const STYLE_STACKED_AREA: &str = "telemetry:stacked-area";

/// Rendered chart width in pixels.
pub const CHART_WIDTH: u32 = 1000;

/// Rendered chart height in pixels.
pub const CHART_HEIGHT: u32 = 500;

/// Maximum number of health probes before startup is declared failed.
pub const HEALTH_MAX_ATTEMPTS: u32 = 30;

/// Delay between consecutive health probes.
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Per-attempt timeout for a single health probe.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout for a render request.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// White-based translucent grid color for light axis colors.
pub const LIGHT_GRID_COLOR: &str = "rgba(255, 255, 255, 0.25)";

/// Black-based translucent grid color for dark axis colors.
pub const DARK_GRID_COLOR: &str = "rgba(0, 0, 0, 0.15)";

/// Neutral fallback grid color for unparsable axis colors.
pub const NEUTRAL_GRID_COLOR: &str = "rgba(128, 128, 128, 0.2)";

/// Application name used in CLI output and container names.
pub const APP_NAME: &str = "chartust";

/// Returns the health endpoint URL on the local render service.
#[must_use]
pub fn health_url() -> String {
    format!("http://localhost:{RENDER_SERVICE_PORT}/health")
}

/// Returns the render endpoint URL on the local render service.
#[must_use]
pub fn render_url() -> String {
    format!("http://localhost:{RENDER_SERVICE_PORT}/render")
}
