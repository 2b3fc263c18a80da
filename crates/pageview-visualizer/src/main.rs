//! Main entry point for the page-view visualizer.

use anyhow::Context;
use pageview_config::ConfigLoader;
use pageview_visualizer::{run, setup_logging};

fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::defaults().context("invalid built-in configuration")?;
    setup_logging(&config)?;

    let input = config.input.path.clone();
    let summary = run(config).with_context(|| format!("failed to visualize '{}'", input.display()))?;

    tracing::info!(
        loaded = summary.loaded,
        removed = summary.removed,
        "Finished"
    );
    Ok(())
}
