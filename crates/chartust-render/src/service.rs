//! Container-delegated render service.
//!
//! Runs the ECharts render service in a docker container: pulls the image,
//! starts the container with the style registry bind-mounted, polls the
//! health endpoint until the service answers, then forwards render requests
//! over HTTP. Teardown is best-effort and never propagates failures.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use chartust_common::constants::{
    APP_NAME, CONTAINER_CONFIG_PATH, HEALTH_MAX_ATTEMPTS, HEALTH_POLL_INTERVAL,
    HEALTH_PROBE_TIMEOUT, RENDER_SERVICE_IMAGE, RENDER_SERVICE_PORT, RENDER_TIMEOUT, STYLE_LINE,
    STYLE_STACKED_AREA, health_url, render_url,
};
use chartust_common::error::{ChartustError, Result};
use chartust_common::types::{LineChartRequest, RequestId, StackedAreaChartRequest};
use chartust_options::{ChartOption, line_chart_option, stacked_area_chart_option};
use serde::Serialize;

use crate::{ChartRenderer, png_data_url};

/// Style registry mounted into the render container. The option object is
/// built client-side and carried in the render payload, so `getOption` is a
/// passthrough; the registry still owns the canvas dimensions per style key.
const SERVICE_CONFIG_TEMPLATE: &str = include_str!("../assets/chartConfig.js");

/// Lifecycle state of the render service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// No container is running.
    Stopped,
    /// The container is being created and started.
    Starting,
    /// The container is up; waiting for the health endpoint.
    Polling,
    /// The service answered a health probe and accepts render requests.
    Ready,
    /// Teardown is in progress.
    Stopping,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Starting => write!(f, "starting"),
            Self::Polling => write!(f, "polling"),
            Self::Ready => write!(f, "ready"),
            Self::Stopping => write!(f, "stopping"),
        }
    }
}

/// Body of a render request: `{ requestId, style, data }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    /// Identifier attached for traceability.
    pub request_id: RequestId,
    /// Style key selecting the registry entry.
    pub style: String,
    /// The chart option built by the configuration mapper.
    pub data: ChartOption,
}

/// Renderer that delegates to the containerized render service.
///
/// Not thread-safe by design; callers are single-threaded request handlers.
/// The container is torn down on [`stop`](Self::stop) or drop, whichever
/// comes first.
pub struct ServiceRenderer {
    state: ServiceState,
    container_name: Option<String>,
    config_dir: Option<tempfile::TempDir>,
    health_client: reqwest::blocking::Client,
    render_client: reqwest::blocking::Client,
}

impl ServiceRenderer {
    /// Creates a renderer in the `Stopped` state. No container is started
    /// until the first render call.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be constructed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            state: ServiceState::Stopped,
            container_name: None,
            config_dir: None,
            health_client: build_client(HEALTH_PROBE_TIMEOUT)?,
            render_client: build_client(RENDER_TIMEOUT)?,
        })
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ServiceState {
        self.state
    }

    /// Returns whether the docker binary is present on this host.
    #[must_use]
    pub fn is_available() -> bool {
        find_docker().is_ok()
    }

    /// Starts the container and waits for it to become healthy.
    ///
    /// Idempotent: a second call while the service is already starting or
    /// ready is a no-op. On poll exhaustion the partially started container
    /// is torn down and the state returns to `Stopped`.
    ///
    /// # Errors
    ///
    /// Returns an error if docker is missing, the container cannot be
    /// started, or the health poll budget is exhausted.
    pub fn ensure_running(&mut self) -> Result<()> {
        if self.state != ServiceState::Stopped {
            return Ok(());
        }
        self.state = ServiceState::Starting;

        if let Err(e) = self.start_container() {
            self.teardown();
            return Err(e);
        }

        self.state = ServiceState::Polling;
        let health = health_url();
        let probe = || probe_health(&self.health_client, &health);
        match poll_until_healthy(probe, HEALTH_MAX_ATTEMPTS, HEALTH_POLL_INTERVAL) {
            Ok(attempts) => {
                tracing::info!(attempts, "render service is ready");
                self.state = ServiceState::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::error!("render service failed to become healthy");
                self.teardown();
                Err(e)
            }
        }
    }

    /// Stops and removes the container.
    ///
    /// Best-effort: failures are logged, never returned, so teardown cannot
    /// block a caller's exit path. Stopping an already stopped renderer is
    /// a no-op.
    pub fn stop(&mut self) {
        if self.container_name.is_none() {
            self.state = ServiceState::Stopped;
            return;
        }
        self.state = ServiceState::Stopping;
        self.teardown();
    }

    /// Pulls the image, writes the style registry, and launches the container.
    fn start_container(&mut self) -> Result<()> {
        let docker = find_docker()?;
        let config_dir = write_service_config()?;
        let config_path = config_dir.path().join("chartConfig.js");
        let name = format!("{APP_NAME}-renderer-{}", chrono::Utc::now().timestamp_millis());

        tracing::info!(container = %name, "starting render service container");
        tracing::debug!(config = %config_path.display(), "using style registry");

        run_docker(&docker, &["pull", RENDER_SERVICE_IMAGE])?;
        run_docker(
            &docker,
            &[
                "run",
                "-d",
                "--name",
                &name,
                "-p",
                &format!("{RENDER_SERVICE_PORT}:{RENDER_SERVICE_PORT}"),
                "-v",
                &format!("{}:{CONTAINER_CONFIG_PATH}:ro", config_path.display()),
                RENDER_SERVICE_IMAGE,
                "server",
                "--config",
                CONTAINER_CONFIG_PATH,
            ],
        )?;

        self.container_name = Some(name);
        self.config_dir = Some(config_dir);
        Ok(())
    }

    /// Removes the container and config mount, swallowing failures.
    fn teardown(&mut self) {
        if let Some(name) = self.container_name.take() {
            tracing::info!(container = %name, "stopping render service container");
            if let Err(e) = remove_container(&name) {
                tracing::warn!(container = %name, error = %e, "failed to stop render service container");
            }
        }
        self.config_dir = None;
        self.state = ServiceState::Stopped;
    }

    /// Renders one chart through the service.
    fn render(&mut self, style: &str, data: ChartOption) -> Result<String> {
        self.ensure_running()?;

        let payload = RenderPayload {
            request_id: RequestId::generate(),
            style: style.into(),
            data,
        };
        tracing::debug!(request_id = %payload.request_id, style, "sending render request");

        let bytes = post_render(&self.render_client, &render_url(), &payload)?;
        Ok(png_data_url(&bytes))
    }
}

impl ChartRenderer for ServiceRenderer {
    fn render_line_chart(&mut self, request: &LineChartRequest) -> Result<String> {
        self.render(STYLE_LINE, line_chart_option(request))
    }

    fn render_stacked_area_chart(&mut self, request: &StackedAreaChartRequest) -> Result<String> {
        self.render(STYLE_STACKED_AREA, stacked_area_chart_option(request))
    }
}

impl Drop for ServiceRenderer {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ---------------------------------------------------------------------------
// Free helper functions
// ---------------------------------------------------------------------------

/// Builds a blocking HTTP client with the given request timeout.
fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?)
}

/// Finds the docker binary on the current `PATH`.
fn find_docker() -> Result<PathBuf> {
    which::which("docker").map_err(|_| ChartustError::Container {
        message: "docker binary not found on PATH (install docker to use the render service)"
            .into(),
    })
}

/// Runs a docker subcommand, mapping a non-zero exit to a domain error with
/// the captured stderr.
fn run_docker(docker: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new(docker)
        .args(args)
        .output()
        .map_err(|e| ChartustError::Io {
            path: docker.to_path_buf(),
            source: e,
        })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChartustError::Container {
            message: format!(
                "docker {} exited with {}: {}",
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            ),
        });
    }
    Ok(())
}

/// Stops and removes a container by name.
fn remove_container(name: &str) -> Result<()> {
    let docker = find_docker()?;
    run_docker(&docker, &["stop", name])?;
    run_docker(&docker, &["rm", name])
}

/// Writes the style-registry config into a fresh temp directory.
///
/// The directory handle must stay alive as long as the container runs; the
/// mount goes stale once it is dropped.
fn write_service_config() -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir().map_err(|e| ChartustError::Io {
        path: std::env::temp_dir(),
        source: e,
    })?;
    let config = SERVICE_CONFIG_TEMPLATE
        .replace(
            "__CHART_WIDTH__",
            &chartust_common::constants::CHART_WIDTH.to_string(),
        )
        .replace(
            "__CHART_HEIGHT__",
            &chartust_common::constants::CHART_HEIGHT.to_string(),
        );
    let path = dir.path().join("chartConfig.js");
    std::fs::write(&path, config).map_err(|e| ChartustError::Io { path, source: e })?;
    Ok(dir)
}

/// Sends one health probe; any non-error HTTP response counts as healthy.
#[must_use]
pub fn probe_health(client: &reqwest::blocking::Client, url: &str) -> bool {
    client.get(url).send().is_ok_and(|response| {
        let status = response.status();
        !status.is_client_error() && !status.is_server_error()
    })
}

/// Polls `probe` until it succeeds or `max_attempts` is exhausted, sleeping
/// `interval` between attempts. Returns the number of attempts used.
///
/// # Errors
///
/// Returns [`ChartustError::ServiceUnavailable`] after `max_attempts`
/// consecutive failures.
pub fn poll_until_healthy<F>(mut probe: F, max_attempts: u32, interval: Duration) -> Result<u32>
where
    F: FnMut() -> bool,
{
    for attempt in 1..=max_attempts {
        if probe() {
            return Ok(attempt);
        }
        if attempt < max_attempts {
            std::thread::sleep(interval);
        }
    }
    Err(ChartustError::ServiceUnavailable {
        attempts: max_attempts,
    })
}

/// POSTs a render payload and returns the binary image response.
///
/// A non-success status surfaces the decoded response body in the error
/// message; network-level failures propagate the transport error unchanged.
///
/// # Errors
///
/// Returns [`ChartustError::RenderFailed`] for non-2xx responses and
/// [`ChartustError::Http`] for transport failures.
pub fn post_render(
    client: &reqwest::blocking::Client,
    url: &str,
    payload: &RenderPayload,
) -> Result<Vec<u8>> {
    let response = client.post(url).json(payload).send()?;
    let status = response.status();
    if status.is_success() {
        Ok(response.bytes()?.to_vec())
    } else {
        let body = response.text().unwrap_or_default();
        Err(ChartustError::RenderFailed { message: body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_succeeds_on_first_healthy_probe() {
        let attempts = poll_until_healthy(|| true, 30, Duration::ZERO).expect("poll failed");
        assert_eq!(attempts, 1);
    }

    #[test]
    fn poll_retries_through_transient_failures() {
        let mut calls = 0u32;
        let attempts = poll_until_healthy(
            || {
                calls += 1;
                calls > 5
            },
            30,
            Duration::ZERO,
        )
        .expect("poll failed");
        assert_eq!(attempts, 6);
        assert_eq!(calls, 6);
    }

    #[test]
    fn poll_stops_after_max_attempts() {
        let mut calls = 0u32;
        let err = poll_until_healthy(
            || {
                calls += 1;
                false
            },
            30,
            Duration::ZERO,
        )
        .expect_err("poll should exhaust");
        assert_eq!(calls, 30);
        assert!(matches!(
            err,
            ChartustError::ServiceUnavailable { attempts: 30 }
        ));
    }

    #[test]
    fn poll_does_not_probe_past_success() {
        let mut calls = 0u32;
        let _attempts = poll_until_healthy(
            || {
                calls += 1;
                calls == 3
            },
            30,
            Duration::ZERO,
        )
        .expect("poll failed");
        assert_eq!(calls, 3);
    }

    #[test]
    fn new_renderer_starts_stopped() {
        let renderer = ServiceRenderer::new().expect("client build failed");
        assert_eq!(renderer.state(), ServiceState::Stopped);
    }

    #[test]
    fn stop_without_container_is_noop() {
        let mut renderer = ServiceRenderer::new().expect("client build failed");
        renderer.stop();
        renderer.stop();
        assert_eq!(renderer.state(), ServiceState::Stopped);
    }

    #[test]
    fn state_display_matches_lowercase_names() {
        assert_eq!(ServiceState::Polling.to_string(), "polling");
        assert_eq!(ServiceState::Ready.to_string(), "ready");
    }

    #[test]
    fn render_payload_serializes_with_camel_case_request_id() {
        let payload = RenderPayload {
            request_id: RequestId::new("render-1-abc"),
            style: STYLE_LINE.into(),
            data: line_chart_option(&LineChartRequest {
                label: "t".into(),
                axis_color: "#fff".into(),
                line: chartust_common::types::ChartSeries {
                    label: "s".into(),
                    color: "#f00".into(),
                    points: Vec::new(),
                },
            }),
        };
        let json = serde_json::to_value(&payload).expect("serialize failed");
        assert_eq!(json["requestId"], "render-1-abc");
        assert_eq!(json["style"], "telemetry:line");
        assert!(json["data"].is_object());
    }
}
