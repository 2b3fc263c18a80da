//! Run the whole visualizer for one configuration.

use crate::{VisualizerError, VisualizerResult};
use pageview_common::{init_logging, LoggingConfig};
use pageview_config::VisualizerConfig;
use pageview_graphs::{RenderSummary, VisualizerPipeline};
use tracing::info;

/// Install the global subscriber described by `config.logging`.
pub fn setup_logging(config: &VisualizerConfig) -> VisualizerResult<()> {
    init_logging(LoggingConfig::from(&config.logging)).map_err(VisualizerError::Logging)
}

/// Load, clean and render all three charts.
pub fn run(config: VisualizerConfig) -> VisualizerResult<RenderSummary> {
    info!(input = %config.input.path.display(), "Starting page-view visualizer");
    let pipeline = VisualizerPipeline::load(config)?;
    let summary = pipeline.render_all()?;
    for path in summary.paths() {
        info!(path = %path.display(), "Wrote graph");
    }
    Ok(summary)
}
