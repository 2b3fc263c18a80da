//! Load, clean and render pipeline
//!
//! The pipeline owns the cleaned series for its whole lifetime. Each draw
//! call derives its own chart data from it, writes the PNG and hands the
//! rendered graph back to the caller.

use crate::renderer::ensure_parent_dir;
use crate::{
    CleanedSeries, DailyPageViewGraph, GraphConfig, GraphRenderer, MonthlyAverageGraph,
    OutlierFilter, PageViewSeries, SeasonalBoxGraph,
};
use pageview_common::Result;
use pageview_config::{ConfigValidator, VisualizerConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

/// A graph that has been written to disk, with the data and style used
#[derive(Debug, Clone)]
pub struct RenderedGraph<G> {
    pub graph: G,
    pub config: GraphConfig,
    pub path: PathBuf,
}

impl<G> RenderedGraph<G> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outputs of a full run
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub line: RenderedGraph<DailyPageViewGraph>,
    pub bar: RenderedGraph<MonthlyAverageGraph>,
    pub box_plot: RenderedGraph<SeasonalBoxGraph>,
    /// Records before cleaning
    pub loaded: usize,
    /// Records dropped as outliers
    pub removed: usize,
}

impl RenderSummary {
    /// Output files in line, bar, box order
    pub fn paths(&self) -> [&Path; 3] {
        [self.line.path(), self.bar.path(), self.box_plot.path()]
    }
}

/// Cleaned page-view data plus the settings for the three charts
#[derive(Debug, Clone)]
pub struct VisualizerPipeline {
    config: VisualizerConfig,
    cleaned: CleanedSeries,
}

impl VisualizerPipeline {
    /// Validate `config`, load its input file and remove outliers.
    #[instrument(skip_all, fields(input = %config.input.path.display()))]
    pub fn load(config: VisualizerConfig) -> Result<Self> {
        ConfigValidator::validate(&config)?;
        let series = PageViewSeries::from_csv_path(&config.input.path)?;
        Self::from_series(config, &series)
    }

    /// Build a pipeline from an already loaded series.
    pub fn from_series(config: VisualizerConfig, series: &PageViewSeries) -> Result<Self> {
        let cleaned = OutlierFilter::from_config(&config.cleaning)?.clean(series)?;
        Ok(Self { config, cleaned })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn cleaned(&self) -> &CleanedSeries {
        &self.cleaned
    }

    /// Series every chart is drawn from
    pub fn series(&self) -> &PageViewSeries {
        self.cleaned.series()
    }

    /// Draw the daily line chart.
    pub fn draw_line_plot(&self) -> Result<RenderedGraph<DailyPageViewGraph>> {
        let graph = DailyPageViewGraph::from_series(self.series())?;
        let config = DailyPageViewGraph::default_config().with_canvas(&self.config.charts.line);
        render(graph, config, &self.config.output.line_plot)
    }

    /// Draw the monthly average bar chart.
    pub fn draw_bar_plot(&self) -> Result<RenderedGraph<MonthlyAverageGraph>> {
        let graph = MonthlyAverageGraph::from_series(self.series())?;
        let config = MonthlyAverageGraph::default_config().with_canvas(&self.config.charts.bar);
        render(graph, config, &self.config.output.bar_plot)
    }

    /// Draw the year-wise and month-wise box plots.
    pub fn draw_box_plot(&self) -> Result<RenderedGraph<SeasonalBoxGraph>> {
        let graph = SeasonalBoxGraph::from_series(self.series())?;
        let config = SeasonalBoxGraph::default_config().with_canvas(&self.config.charts.box_plot);
        render(graph, config, &self.config.output.box_plot)
    }

    /// Draw all three charts, stopping at the first failure.
    #[instrument(skip_all)]
    pub fn render_all(&self) -> Result<RenderSummary> {
        let start = Instant::now();
        let summary = RenderSummary {
            line: self.draw_line_plot()?,
            bar: self.draw_bar_plot()?,
            box_plot: self.draw_box_plot()?,
            loaded: self.cleaned.original_len(),
            removed: self.cleaned.removed(),
        };
        info!(
            loaded = summary.loaded,
            removed = summary.removed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered all graphs"
        );
        Ok(summary)
    }
}

fn render<G: GraphRenderer>(graph: G, config: GraphConfig, path: &Path) -> Result<RenderedGraph<G>> {
    ensure_parent_dir(path)?;
    graph.render_to_file(&config, path)?;
    Ok(RenderedGraph {
        graph,
        config,
        path: path.to_path_buf(),
    })
}
