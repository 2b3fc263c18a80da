//! Year-wise and month-wise box plots drawn side by side

use crate::cleaner::{linear_quantile, sorted_values};
use crate::renderer::{draw_category_labels, padded_max};
use crate::{CalendarMonth, GraphConfig, GraphRenderer, GraphType, PageViewSeries, PanelLabels};
use chrono::Datelike;
use pageview_common::{PageViewError, Result};
use pageview_config::ChartsConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half the width of a box in category units
const BOX_HALF_WIDTH: f64 = 0.3;
const CAP_HALF_WIDTH: f64 = 0.15;
/// Whisker reach in multiples of the interquartile range
const WHISKER_IQR: f64 = 1.5;

/// One cleaned day with its year and month broken out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub year: i32,
    pub month: CalendarMonth,
    pub value: u64,
}

impl BoxRecord {
    pub fn month_abbr(&self) -> &'static str {
        self.month.abbreviation()
    }
}

/// Five-number summary with Tukey whiskers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation no further than 1.5 IQR below `q1`
    pub lower_whisker: f64,
    /// Largest observation no further than 1.5 IQR above `q3`
    pub upper_whisker: f64,
    /// Observations beyond the whiskers, ascending
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxStats {
    pub fn from_values(values: &[u64]) -> Result<Self> {
        let sorted = sorted_values(values.iter().copied());
        if sorted.is_empty() {
            return Err(PageViewError::empty_dataset(
                "box statistics need at least one value",
            ));
        }

        let q1 = linear_quantile(&sorted, 0.25)?;
        let median = linear_quantile(&sorted, 0.5)?;
        let q3 = linear_quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .map_or(q1, |v| v.min(q1));
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .map_or(q3, |v| v.max(q3));
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_whisker || *v > upper_whisker)
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
            count: sorted.len(),
        })
    }
}

/// One slot on a box panel. `stats` is `None` when the slot has no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGroup {
    pub label: String,
    pub stats: Option<BoxStats>,
}

impl BoxGroup {
    fn from_values(label: String, values: &[u64]) -> Result<Self> {
        let stats = if values.is_empty() {
            None
        } else {
            Some(BoxStats::from_values(values)?)
        };
        Ok(Self { label, stats })
    }
}

/// Trend and seasonality box plots of the cleaned series
#[derive(Debug, Clone)]
pub struct SeasonalBoxGraph {
    records: Vec<BoxRecord>,
    yearly: Vec<BoxGroup>,
    monthly: Vec<BoxGroup>,
}

impl SeasonalBoxGraph {
    pub fn from_series(series: &PageViewSeries) -> Result<Self> {
        if series.is_empty() {
            return Err(PageViewError::empty_dataset(
                "no records left to draw the box plots",
            ));
        }

        let records: Vec<BoxRecord> = series
            .iter()
            .map(|record| BoxRecord {
                year: record.date.year(),
                month: CalendarMonth::of(record.date),
                value: record.value,
            })
            .collect();

        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let yearly = years
            .iter()
            .map(|&year| {
                let values: Vec<u64> = records
                    .iter()
                    .filter(|r| r.year == year)
                    .map(|r| r.value)
                    .collect();
                BoxGroup::from_values(year.to_string(), &values)
            })
            .collect::<Result<Vec<_>>>()?;

        let monthly = CalendarMonth::ALL
            .iter()
            .map(|&month| {
                let values: Vec<u64> = records
                    .iter()
                    .filter(|r| r.month == month)
                    .map(|r| r.value)
                    .collect();
                BoxGroup::from_values(month.abbreviation().to_string(), &values)
            })
            .collect::<Result<Vec<_>>>()?;

        let missing: Vec<&str> = monthly
            .iter()
            .filter(|group| group.stats.is_none())
            .map(|group| group.label.as_str())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(months = ?missing, "Months without data have no box");
        }

        Ok(Self {
            records,
            yearly,
            monthly,
        })
    }

    pub fn default_config() -> GraphConfig {
        let mut config = GraphConfig {
            graph_type: GraphType::Box,
            title: "Page View Box Plots".to_string(),
            panels: vec![
                PanelLabels::new("Year-wise Box Plot (Trend)", "Year", "Page Views"),
                PanelLabels::new("Month-wise Box Plot (Seasonality)", "Month", "Page Views"),
            ],
            ..Default::default()
        }
        .with_canvas(&ChartsConfig::default().box_plot);
        config.style.title_font.size = 28;
        config.style.axis_font.size = 20;
        config.style.label_font.size = 16;
        config.style.margins.bottom = 70;
        config.style.margins.left = 100;
        config.style.grid.show_x = false;
        config
    }

    /// Per-day records in date order
    pub fn records(&self) -> &[BoxRecord] {
        &self.records
    }

    /// One group per distinct year, ascending
    pub fn yearly(&self) -> &[BoxGroup] {
        &self.yearly
    }

    /// Twelve groups, January to December
    pub fn monthly(&self) -> &[BoxGroup] {
        &self.monthly
    }

    fn max_value(&self) -> f64 {
        self.records.iter().map(|r| r.value as f64).fold(0.0, f64::max)
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        groups: &[BoxGroup],
        labels: &PanelLabels,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let style = &config.style;
        let mut chart = ChartBuilder::on(area)
            .caption(&labels.title, (style.title_font.family.as_str(), style.title_font.size))
            .margin(style.margins.top)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(0f64..groups.len() as f64, 0f64..padded_max(self.max_value()))?;

        let no_label = |_: &f64| String::new();
        let count_label = |v: &f64| format!("{v:.0}");
        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&no_label)
            .y_label_formatter(&count_label)
            .x_desc(labels.x_label.as_str())
            .y_desc(labels.y_label.as_str())
            .axis_desc_style((style.axis_font.family.as_str(), style.axis_font.size))
            .label_style((style.label_font.family.as_str(), style.label_font.size));
        if !style.grid.show_x {
            mesh.disable_x_mesh();
        }
        if !style.grid.show_y {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        let group_labels: Vec<String> = groups.iter().map(|group| group.label.clone()).collect();
        draw_category_labels(
            area,
            |x| chart.backend_coord(&(x, 0.0)),
            &group_labels,
            &style.label_font,
        )?;

        let outline = BLACK.stroke_width(1);
        for (index, group) in groups.iter().enumerate() {
            let Some(stats) = &group.stats else {
                continue;
            };
            let center = index as f64 + 0.5;
            let (left, right) = (center - BOX_HALF_WIDTH, center + BOX_HALF_WIDTH);
            let fill = self.color_at(&style.color_scheme, index);

            chart.draw_series([
                Rectangle::new([(left, stats.q1), (right, stats.q3)], fill.filled()),
                Rectangle::new([(left, stats.q1), (right, stats.q3)], outline),
            ])?;
            chart.draw_series([
                PathElement::new(vec![(left, stats.median), (right, stats.median)], BLACK.stroke_width(2)),
                PathElement::new(vec![(center, stats.q3), (center, stats.upper_whisker)], outline),
                PathElement::new(vec![(center, stats.q1), (center, stats.lower_whisker)], outline),
                PathElement::new(
                    vec![
                        (center - CAP_HALF_WIDTH, stats.upper_whisker),
                        (center + CAP_HALF_WIDTH, stats.upper_whisker),
                    ],
                    outline,
                ),
                PathElement::new(
                    vec![
                        (center - CAP_HALF_WIDTH, stats.lower_whisker),
                        (center + CAP_HALF_WIDTH, stats.lower_whisker),
                    ],
                    outline,
                ),
            ])?;
            chart.draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|value| Circle::new((center, *value), 3, outline)),
            )?;
        }

        Ok(())
    }
}

impl GraphRenderer for SeasonalBoxGraph {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.records.is_empty() {
            return Err(PageViewError::graph("No data available for box plots"));
        }
        let [year_labels, month_labels] = config.panels.as_slice() else {
            return Err(PageViewError::validation_field(
                format!("box plots need 2 panel labels, got {}", config.panels.len()),
                "panels",
            ));
        };

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let panels = root.split_evenly((1, 2));
        self.draw_panel(&panels[0], &self.yearly, year_labels, config)?;
        self.draw_panel(&panels[1], &self.monthly, month_labels, config)?;

        root.present()?;
        tracing::info!(
            records = self.records.len(),
            years = self.yearly.len(),
            path = %path.display(),
            "Rendered seasonal box plots"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageViewRecord;
    use chrono::NaiveDate;
    use pageview_common::test_utils::assert_approx_eq;
    use pageview_common::test_utils::pageview_fixtures::seasonal_series;
    use tempfile::TempDir;

    fn series(rows: &[(&str, u64)]) -> PageViewSeries {
        PageViewSeries::new(
            rows.iter()
                .map(|(d, v)| PageViewRecord::new(d.parse().unwrap(), *v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_box_stats_quartiles_and_whiskers() {
        let stats = BoxStats::from_values(&[1, 2, 3, 4, 5, 6, 7, 8, 100]).unwrap();

        assert_approx_eq(stats.q1, 3.0, 1e-9);
        assert_approx_eq(stats.median, 5.0, 1e-9);
        assert_approx_eq(stats.q3, 7.0, 1e-9);
        // fences are -3 and 13
        assert_approx_eq(stats.lower_whisker, 1.0, 1e-9);
        assert_approx_eq(stats.upper_whisker, 8.0, 1e-9);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.count, 9);
    }

    #[test]
    fn test_box_stats_single_value() {
        let stats = BoxStats::from_values(&[42]).unwrap();
        assert_eq!(stats.q1, 42.0);
        assert_eq!(stats.q3, 42.0);
        assert_eq!(stats.lower_whisker, 42.0);
        assert_eq!(stats.upper_whisker, 42.0);
        assert!(stats.outliers.is_empty());
        assert!(BoxStats::from_values(&[]).is_err());
    }

    #[test]
    fn test_records_carry_year_and_month() {
        let graph = SeasonalBoxGraph::from_series(&series(&[
            ("2017-03-01", 5),
            ("2016-11-30", 9),
        ]))
        .unwrap();

        assert_eq!(
            graph.records(),
            &[
                BoxRecord { year: 2016, month: CalendarMonth::November, value: 9 },
                BoxRecord { year: 2017, month: CalendarMonth::March, value: 5 },
            ]
        );
        assert_eq!(graph.records()[0].month_abbr(), "Nov");
    }

    #[test]
    fn test_yearly_groups_are_distinct_ascending_years() {
        let graph = SeasonalBoxGraph::from_series(&series(&[
            ("2019-01-01", 1),
            ("2017-01-01", 2),
            ("2018-06-01", 3),
            ("2017-02-01", 4),
        ]))
        .unwrap();

        let labels: Vec<&str> = graph.yearly().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["2017", "2018", "2019"]);
        assert_eq!(graph.yearly()[0].stats.as_ref().unwrap().count, 2);
    }

    #[test]
    fn test_monthly_groups_cover_calendar_with_gaps() {
        let graph = SeasonalBoxGraph::from_series(&series(&[
            ("2019-12-01", 1),
            ("2018-04-01", 2),
            ("2017-04-02", 3),
        ]))
        .unwrap();

        let labels: Vec<&str> = graph.monthly().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert!(graph.monthly()[0].stats.is_none());
        assert_eq!(graph.monthly()[3].stats.as_ref().unwrap().count, 2);
        assert_eq!(graph.monthly()[11].stats.as_ref().unwrap().count, 1);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert!(matches!(
            SeasonalBoxGraph::from_series(&PageViewSeries::default()),
            Err(PageViewError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_default_config_panels() {
        let config = SeasonalBoxGraph::default_config();
        assert_eq!(config.graph_type, GraphType::Box);
        assert_eq!((config.width, config.height), (3200, 1000));
        assert_eq!(
            config.panels,
            vec![
                PanelLabels::new("Year-wise Box Plot (Trend)", "Year", "Page Views"),
                PanelLabels::new("Month-wise Box Plot (Seasonality)", "Month", "Page Views"),
            ]
        );
    }

    #[test]
    fn test_render_requires_two_panels() {
        let temp_dir = TempDir::new().unwrap();
        let graph = SeasonalBoxGraph::from_series(&series(&[("2019-12-01", 1)])).unwrap();
        let mut config = SeasonalBoxGraph::default_config();
        config.panels.pop();

        let result = graph.render_to_file(&config, &temp_dir.path().join("box.png"));
        assert!(matches!(result, Err(PageViewError::Validation { .. })));
    }

    #[test]
    fn test_render_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("box_plot.png");

        let rows = seasonal_series(
            NaiveDate::from_ymd_opt(2016, 5, 9).unwrap(),
            NaiveDate::from_ymd_opt(2018, 2, 28).unwrap(),
        );
        let series = PageViewSeries::new(
            rows.into_iter()
                .map(|(date, value)| PageViewRecord::new(date, value))
                .collect(),
        )
        .unwrap();
        let graph = SeasonalBoxGraph::from_series(&series).unwrap();

        let mut config = SeasonalBoxGraph::default_config();
        config.width = 1200;
        config.height = 400;

        let result = graph.render_to_file(&config, &path);
        assert!(result.is_ok(), "Failed to render graph: {:?}", result.err());
        assert!(path.exists(), "Graph file was not created");
        assert!(std::fs::metadata(&path).unwrap().len() > 1000);
    }
}
