//! CLI command definitions and dispatch.

pub mod check;
pub mod render;

use clap::{Parser, Subcommand};

/// Chartust — telemetry chart rendering for automation reports.
#[derive(Parser, Debug)]
#[command(name = "chartust", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a chart request to a PNG data URL.
    Render(render::RenderArgs),
    /// Report which renderers are available on this host.
    Check(check::CheckArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Render(args) => render::execute(args),
        Command::Check(args) => check::execute(args),
    }
}
