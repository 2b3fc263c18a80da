//! Quantile-based outlier removal

use crate::PageViewSeries;
use pageview_common::{PageViewError, Result};
use pageview_config::CleaningConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Quantile of already sorted values using linear interpolation between the
/// two nearest ranks: `h = (n - 1) * q`, interpolated between
/// `sorted[floor(h)]` and `sorted[floor(h) + 1]`.
pub fn linear_quantile(sorted: &[f64], q: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(PageViewError::empty_dataset(
            "quantile of an empty series is undefined",
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(PageViewError::validation_field(
            format!("quantile {q} is outside [0, 1]"),
            "q",
        ));
    }

    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = h - lower as f64;
    Ok(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Values converted for quantile computation and sorted ascending.
pub(crate) fn sorted_values(values: impl IntoIterator<Item = u64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().map(|v| v as f64).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Inclusive value range computed from a series' distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileBounds {
    pub lower_quantile: f64,
    pub upper_quantile: f64,
    pub lower: f64,
    pub upper: f64,
}

impl QuantileBounds {
    /// Compute the bounds over every value of `series`.
    pub fn from_series(series: &PageViewSeries, lower_quantile: f64, upper_quantile: f64) -> Result<Self> {
        let sorted = sorted_values(series.iter().map(|r| r.value));
        Ok(Self {
            lower_quantile,
            upper_quantile,
            lower: linear_quantile(&sorted, lower_quantile)?,
            upper: linear_quantile(&sorted, upper_quantile)?,
        })
    }

    /// Whether `value` lies within `[lower, upper]`.
    pub fn contains(&self, value: u64) -> bool {
        let value = value as f64;
        self.lower <= value && value <= self.upper
    }

    /// Keep only the records of `series` inside these bounds.
    pub fn apply(&self, series: &PageViewSeries) -> PageViewSeries {
        series.retain_from(|record| self.contains(record.value))
    }
}

/// Cleaned series together with the bounds that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedSeries {
    series: PageViewSeries,
    bounds: QuantileBounds,
    original_len: usize,
}

impl CleanedSeries {
    pub fn series(&self) -> &PageViewSeries {
        &self.series
    }

    pub fn bounds(&self) -> &QuantileBounds {
        &self.bounds
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Number of records dropped as outliers.
    pub fn removed(&self) -> usize {
        self.original_len - self.series.len()
    }

    pub fn into_series(self) -> PageViewSeries {
        self.series
    }
}

/// Removes records outside a central quantile range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierFilter {
    lower_quantile: f64,
    upper_quantile: f64,
}

impl OutlierFilter {
    pub fn new(lower_quantile: f64, upper_quantile: f64) -> Result<Self> {
        for (q, field) in [(lower_quantile, "lower_quantile"), (upper_quantile, "upper_quantile")] {
            if !(0.0..=1.0).contains(&q) {
                return Err(PageViewError::validation_field(
                    format!("quantile {q} is outside [0, 1]"),
                    field,
                ));
            }
        }
        if lower_quantile > upper_quantile {
            return Err(PageViewError::validation(format!(
                "lower quantile {lower_quantile} exceeds upper quantile {upper_quantile}"
            )));
        }
        Ok(Self {
            lower_quantile,
            upper_quantile,
        })
    }

    pub fn from_config(config: &CleaningConfig) -> Result<Self> {
        Self::new(config.lower_quantile, config.upper_quantile)
    }

    /// Compute bounds from the whole of `series` and keep the records inside them.
    #[instrument(skip_all, fields(records = series.len()))]
    pub fn clean(&self, series: &PageViewSeries) -> Result<CleanedSeries> {
        let bounds = QuantileBounds::from_series(series, self.lower_quantile, self.upper_quantile)?;
        let cleaned = bounds.apply(series);

        info!(
            lower = bounds.lower,
            upper = bounds.upper,
            kept = cleaned.len(),
            removed = series.len() - cleaned.len(),
            "Removed outliers"
        );

        Ok(CleanedSeries {
            series: cleaned,
            bounds,
            original_len: series.len(),
        })
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self {
            lower_quantile: pageview_config::DEFAULT_LOWER_QUANTILE,
            upper_quantile: pageview_config::DEFAULT_UPPER_QUANTILE,
        }
    }
}
