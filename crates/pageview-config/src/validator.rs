//! Runtime validation of configuration values.

use crate::schema::{CanvasConfig, VisualizerConfig};
use pageview_common::{PageViewError, Result};
use std::path::Path;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, returning the first problem found.
    pub fn validate(config: &VisualizerConfig) -> Result<()> {
        Self::validate_path(&config.input.path, "input.path")?;
        Self::validate_quantiles(
            config.cleaning.lower_quantile,
            config.cleaning.upper_quantile,
        )?;

        let outputs = [
            (&config.output.line_plot, "output.line_plot"),
            (&config.output.bar_plot, "output.bar_plot"),
            (&config.output.box_plot, "output.box_plot"),
        ];
        for (path, field) in outputs {
            Self::validate_path(path, field)?;
        }
        for (i, (path, field)) in outputs.iter().enumerate() {
            if outputs[..i].iter().any(|(other, _)| other == path) {
                return Err(PageViewError::validation_field(
                    format!("output path '{}' is used by more than one chart", path.display()),
                    *field,
                ));
            }
        }

        Self::validate_canvas(&config.charts.line, "charts.line")?;
        Self::validate_canvas(&config.charts.bar, "charts.bar")?;
        Self::validate_canvas(&config.charts.box_plot, "charts.box_plot")?;
        Ok(())
    }

    fn validate_path(path: &Path, field: &str) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(PageViewError::validation_field("path cannot be empty", field));
        }
        Ok(())
    }

    fn validate_quantiles(lower: f64, upper: f64) -> Result<()> {
        for (value, field) in [(lower, "cleaning.lower_quantile"), (upper, "cleaning.upper_quantile")] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PageViewError::validation_field(
                    format!("quantile {value} is outside [0, 1]"),
                    field,
                ));
            }
        }
        if lower >= upper {
            return Err(PageViewError::validation_field(
                format!("lower quantile {lower} must be below upper quantile {upper}"),
                "cleaning",
            ));
        }
        Ok(())
    }

    fn validate_canvas(canvas: &CanvasConfig, field: &str) -> Result<()> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(PageViewError::validation_field(
                format!("canvas {}x{} must be non-zero", canvas.width, canvas.height),
                field,
            ));
        }
        Ok(())
    }
}
