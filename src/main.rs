//! statusbar: a VS Code style status bar on a Wayland layer surface.
//!
//! Run with:  `RUST_LOG=debug statusbar`

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("statusbar v{} starting", env!("CARGO_PKG_VERSION"));

    // Timers for temporary messages and background producers run here; the
    // UI thread only applies their results.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let _guard = runtime.enter();

    statusbar_wayland::run().map_err(Into::into)
}
