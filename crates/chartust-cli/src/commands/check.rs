//! `chartust check` — Report which renderers are available on this host.

use chartust_render::service::ServiceRenderer;
use clap::Args;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Executes the `check` command.
///
/// # Errors
///
/// Never fails; present for uniformity with the other handlers.
pub fn execute(_args: CheckArgs) -> anyhow::Result<()> {
    let service = if ServiceRenderer::is_available() {
        "available"
    } else {
        "unavailable (docker not found on PATH)"
    };
    println!("render service: {service}");
    println!("in-process renderer: available");
    Ok(())
}
