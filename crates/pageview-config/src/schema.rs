//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Input dataset configuration.
    pub input: InputConfig,
    /// Outlier removal configuration.
    pub cleaning: CleaningConfig,
    /// Output image paths.
    pub output: OutputConfig,
    /// Canvas sizes per chart.
    pub charts: ChartsConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Input dataset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the `date,value` CSV file.
    pub path: PathBuf,
}

/// Quantile thresholds for outlier removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Lower quantile, inclusive.
    pub lower_quantile: f64,
    /// Upper quantile, inclusive.
    pub upper_quantile: f64,
}

/// Output image paths, overwritten on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Daily line chart.
    pub line_plot: PathBuf,
    /// Monthly average grouped bar chart.
    pub bar_plot: PathBuf,
    /// Yearly and monthly box plots.
    pub box_plot: PathBuf,
}

/// Canvas sizes per chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Line chart canvas.
    pub line: CanvasConfig,
    /// Bar chart canvas.
    pub bar: CanvasConfig,
    /// Box plot canvas, shared by both panels.
    pub box_plot: CanvasConfig,
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default single-line format.
    Plain,
    /// Multi-line format with colors.
    Pretty,
    /// Abbreviated single-line format.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `pageview_graphs=debug`.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Optional log file; logs go to stdout when unset.
    pub file: Option<String>,
}
