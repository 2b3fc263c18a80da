//! Monthly average bar chart grouped by year
//!
//! Each year is one group on the x axis with twelve month slots laid out
//! January to December. A month with no cleaned records in a given year
//! leaves its slot empty so the slots of every group line up.

use crate::renderer::{draw_category_labels, padded_max};
use crate::{CalendarMonth, GraphConfig, GraphRenderer, GraphType, PageViewSeries};
use chrono::Datelike;
use pageview_common::{PageViewError, Result};
use pageview_config::ChartsConfig;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Chart title of the monthly bar chart
pub const BAR_PLOT_TITLE: &str = "Daily freeCodeCamp Forum Average Page Views per Month";

/// Fraction of a year's category width covered by its bars
const GROUP_WIDTH: f64 = 0.8;

/// Mean page views of one month of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: CalendarMonth,
    /// Mean rounded to the nearest integer, ties to even
    pub mean: u64,
    /// Number of days averaged
    pub days: usize,
}

/// Group a series by `(year, month)` and average each group.
///
/// The result is ordered by year, then calendar month.
pub fn aggregate_monthly_averages(series: &PageViewSeries) -> Result<Vec<MonthlyAverage>> {
    if series.is_empty() {
        return Err(PageViewError::empty_dataset(
            "no records to average per month",
        ));
    }

    let mut groups: BTreeMap<(i32, CalendarMonth), (u128, usize)> = BTreeMap::new();
    for record in series {
        let entry = groups
            .entry((record.date.year(), CalendarMonth::of(record.date)))
            .or_insert((0, 0));
        entry.0 += u128::from(record.value);
        entry.1 += 1;
    }

    Ok(groups
        .into_iter()
        .map(|((year, month), (sum, days))| MonthlyAverage {
            year,
            month,
            mean: (sum as f64 / days as f64).round_ties_even() as u64,
            days,
        })
        .collect())
}

/// Grouped bar chart of monthly averages
#[derive(Debug, Clone)]
pub struct MonthlyAverageGraph {
    data: Vec<MonthlyAverage>,
    years: Vec<i32>,
}

impl MonthlyAverageGraph {
    pub fn from_series(series: &PageViewSeries) -> Result<Self> {
        Self::from_averages(aggregate_monthly_averages(series)?)
    }

    /// Build from precomputed averages in any order
    pub fn from_averages(mut data: Vec<MonthlyAverage>) -> Result<Self> {
        if data.is_empty() {
            return Err(PageViewError::empty_dataset(
                "no monthly averages to draw the bar chart",
            ));
        }
        data.sort_by_key(|avg| (avg.year, avg.month));
        let mut years: Vec<i32> = data.iter().map(|avg| avg.year).collect();
        years.dedup();
        debug!(groups = data.len(), years = years.len(), "Aggregated monthly averages");

        let empty_slots = years.len() * CalendarMonth::ALL.len() - data.len();
        if empty_slots > 0 {
            warn!(empty_slots, "Months without data are left empty in the bar chart");
        }
        Ok(Self { data, years })
    }

    pub fn default_config() -> GraphConfig {
        let mut config = GraphConfig {
            graph_type: GraphType::Bar,
            title: BAR_PLOT_TITLE.to_string(),
            x_label: Some("Years".to_string()),
            y_label: Some("Average Page Views".to_string()),
            legend_title: Some("Months".to_string()),
            ..Default::default()
        }
        .with_canvas(&ChartsConfig::default().bar);
        config.style.title_font.size = 28;
        config.style.axis_font.size = 20;
        config.style.label_font.size = 16;
        config.style.margins.bottom = 70;
        config.style.margins.left = 100;
        config.style.grid.show_x = false;
        config
    }

    /// Averages ordered by year, then calendar month
    pub fn data(&self) -> &[MonthlyAverage] {
        &self.data
    }

    /// Distinct years, ascending
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn value_for(&self, year: i32, month: CalendarMonth) -> Option<u64> {
        self.data
            .binary_search_by_key(&(year, month), |avg| (avg.year, avg.month))
            .ok()
            .map(|idx| self.data[idx].mean)
    }

    /// One row per year with a slot per calendar month
    pub fn table(&self) -> Vec<(i32, [Option<u64>; 12])> {
        self.years
            .iter()
            .map(|&year| {
                let mut row = [None; 12];
                for month in CalendarMonth::ALL {
                    row[month.index()] = self.value_for(year, month);
                }
                (year, row)
            })
            .collect()
    }

    /// Horizontal extent of the bar for `month` in the group at `year_index`
    fn bar_span(year_index: usize, month: CalendarMonth) -> (f64, f64) {
        let slot = GROUP_WIDTH / CalendarMonth::ALL.len() as f64;
        let left = year_index as f64 + (1.0 - GROUP_WIDTH) / 2.0 + month.index() as f64 * slot;
        (left, left + slot)
    }

    fn max_mean(&self) -> f64 {
        self.data.iter().map(|avg| avg.mean as f64).fold(0.0, f64::max)
    }
}

impl GraphRenderer for MonthlyAverageGraph {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(PageViewError::graph("No data available for monthly bar chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let style = &config.style;
        let year_count = self.years.len();

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, (style.title_font.family.as_str(), style.title_font.size))
            .margin(style.margins.top)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(0f64..year_count as f64, 0f64..padded_max(self.max_mean()))?;

        let no_label = |_: &f64| String::new();
        let count_label = |v: &f64| format!("{v:.0}");
        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&no_label)
            .y_label_formatter(&count_label)
            .axis_desc_style((style.axis_font.family.as_str(), style.axis_font.size))
            .label_style((style.label_font.family.as_str(), style.label_font.size));
        if let Some(x_label) = &config.x_label {
            mesh.x_desc(x_label);
        }
        if let Some(y_label) = &config.y_label {
            mesh.y_desc(y_label);
        }
        if !style.grid.show_x {
            mesh.disable_x_mesh();
        }
        if !style.grid.show_y {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        let year_labels: Vec<String> = self.years.iter().map(ToString::to_string).collect();
        draw_category_labels(
            &root,
            |x| chart.backend_coord(&(x, 0.0)),
            &year_labels,
            &style.label_font,
        )?;

        if let Some(title) = &config.legend_title {
            // Label-only entry so the heading sits above the month entries
            chart
                .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(title.as_str())
                .legend(|(x, y)| EmptyElement::at((x, y)));
        }

        for month in CalendarMonth::ALL {
            let color = self.color_at(&style.color_scheme, month.index());
            let bars = self
                .years
                .iter()
                .enumerate()
                .filter_map(|(year_index, &year)| {
                    self.value_for(year, month).map(|mean| (year_index, mean))
                })
                .map(|(year_index, mean)| {
                    let (left, right) = Self::bar_span(year_index, month);
                    Rectangle::new([(left, 0.0), (right, mean as f64)], color.filled())
                })
                .collect::<Vec<_>>();

            chart
                .draw_series(bars)?
                .label(month.name())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((style.label_font.family.as_str(), style.label_font.size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        tracing::info!(
            years = year_count,
            bars = self.data.len(),
            path = %path.display(),
            "Rendered monthly bar chart"
        );
        Ok(())
    }
}
