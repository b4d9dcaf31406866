//! `chartust render` — Render a chart request to a PNG data URL.

use std::path::PathBuf;

use anyhow::Context as _;
use chartust_common::types::{LineChartRequest, StackedAreaChartRequest};
use chartust_render::local::LocalRenderer;
use chartust_render::service::ServiceRenderer;
use chartust_render::ChartRenderer;
use clap::{Args, ValueEnum};

/// Chart style selector.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Single-series line chart.
    Line,
    /// Stacked-area chart.
    StackedArea,
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Chart style to render.
    #[arg(long, value_enum)]
    pub style: Style,

    /// Path to the JSON chart request.
    #[arg(long)]
    pub input: PathBuf,

    /// File to write the data URL to; prints to stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Render in-process instead of delegating to the container service.
    #[arg(long)]
    pub local: bool,
}

/// Executes the `render` command.
///
/// # Errors
///
/// Returns an error if the request cannot be read or parsed, or if
/// rendering fails.
pub fn execute(args: RenderArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read request from {}", args.input.display()))?;

    let data_url = if args.local {
        let mut renderer = LocalRenderer::new();
        render_with(&mut renderer, args.style, &content)?
    } else {
        let mut renderer = ServiceRenderer::new()?;
        let result = render_with(&mut renderer, args.style, &content);
        // Teardown runs whether the render succeeded or not.
        renderer.stop();
        result?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &data_url)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "data URL written");
        }
        None => println!("{data_url}"),
    }
    Ok(())
}

/// Parses the request for the selected style and renders it.
fn render_with(
    renderer: &mut dyn ChartRenderer,
    style: Style,
    content: &str,
) -> anyhow::Result<String> {
    match style {
        Style::Line => {
            let request: LineChartRequest =
                serde_json::from_str(content).context("invalid line chart request")?;
            Ok(renderer.render_line_chart(&request)?)
        }
        Style::StackedArea => {
            let request: StackedAreaChartRequest =
                serde_json::from_str(content).context("invalid stacked-area chart request")?;
            Ok(renderer.render_stacked_area_chart(&request)?)
        }
    }
}
