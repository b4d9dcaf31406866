//! # chartust — telemetry chart CLI
//!
//! Renders line and stacked-area telemetry charts for automation reports,
//! either through the containerized render service or in-process.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
