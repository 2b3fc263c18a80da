//! Default values reproducing the fixed paths and canvas sizes of the tool.

use crate::schema::*;
use pageview_common::LoggingConfig;

/// Default input dataset.
pub const DEFAULT_INPUT_PATH: &str = "fcc-forum-pageviews.csv";
/// Default lower cleaning quantile.
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.025;
/// Default upper cleaning quantile.
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.975;
/// Default line chart output.
pub const DEFAULT_LINE_PLOT_PATH: &str = "line_plot.png";
/// Default bar chart output.
pub const DEFAULT_BAR_PLOT_PATH: &str = "bar_plot.png";
/// Default box plot output.
pub const DEFAULT_BOX_PLOT_PATH: &str = "box_plot.png";

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            cleaning: CleaningConfig::default(),
            output: OutputConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_INPUT_PATH.into(),
        }
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            lower_quantile: DEFAULT_LOWER_QUANTILE,
            upper_quantile: DEFAULT_UPPER_QUANTILE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_plot: DEFAULT_LINE_PLOT_PATH.into(),
            bar_plot: DEFAULT_BAR_PLOT_PATH.into(),
            box_plot: DEFAULT_BOX_PLOT_PATH.into(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            line: CanvasConfig::new(2000, 1000),
            bar: CanvasConfig::new(1920, 1080),
            box_plot: CanvasConfig::new(3200, 1000),
        }
    }
}

impl CanvasConfig {
    /// Canvas of the given size in pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
            file: None,
        }
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            compact_format: settings.format == LogFormat::Compact,
            pretty_format: settings.format == LogFormat::Pretty,
            file_path: settings.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
