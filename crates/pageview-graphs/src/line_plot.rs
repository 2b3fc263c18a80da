//! Daily page-view line chart

use crate::{ColorScheme, GraphConfig, GraphRenderer, GraphType, PageViewRecord, PageViewSeries};
use chrono::{Duration, NaiveDate};
use pageview_common::{PageViewError, Result};
use pageview_config::ChartsConfig;
use plotters::prelude::*;
use std::path::Path;

/// Chart title of the daily line chart
pub const LINE_PLOT_TITLE: &str = "Daily freeCodeCamp Forum Page Views 5/2016-12/2019";

/// Line chart of the cleaned daily series
#[derive(Debug, Clone)]
pub struct DailyPageViewGraph {
    data: Vec<PageViewRecord>,
}

impl DailyPageViewGraph {
    /// Build the chart data from a cleaned series
    pub fn from_series(series: &PageViewSeries) -> Result<Self> {
        if series.is_empty() {
            return Err(PageViewError::empty_dataset(
                "no records left to draw the daily line chart",
            ));
        }
        Ok(Self {
            data: series.records().to_vec(),
        })
    }

    /// Title, axis labels, canvas and red line color of the chart
    pub fn default_config() -> GraphConfig {
        let mut config = GraphConfig {
            graph_type: GraphType::Line,
            title: LINE_PLOT_TITLE.to_string(),
            x_label: Some("Date".to_string()),
            y_label: Some("Page Views".to_string()),
            ..Default::default()
        }
        .with_canvas(&ChartsConfig::default().line);
        config.style.color_scheme = ColorScheme::Custom(vec!["#FF0000".to_string()]);
        config.style.title_font.size = 28;
        config.style.axis_font.size = 20;
        config.style.label_font.size = 16;
        config.style.margins.bottom = 70;
        config.style.margins.left = 100;
        config
    }

    /// Points in date order
    pub fn data(&self) -> &[PageViewRecord] {
        &self.data
    }

    /// Dates spanned by the x axis. A single day is widened to two so the
    /// axis range is never empty.
    fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let first = self.data.first().map(|r| r.date).unwrap_or_default();
        let last = self.data.last().map(|r| r.date).unwrap_or(first);
        if first == last {
            (first, last + Duration::days(1))
        } else {
            (first, last)
        }
    }

    fn max_value(&self) -> f64 {
        self.data.iter().map(|r| r.value as f64).fold(0.0, f64::max)
    }
}

impl GraphRenderer for DailyPageViewGraph {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(PageViewError::graph("No data to render"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let (start, end) = self.date_range();
        let y_max = crate::renderer::padded_max(self.max_value());
        let style = &config.style;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, (style.title_font.family.as_str(), style.title_font.size))
            .margin(style.margins.top)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(start..end, 0f64..y_max)?;

        let date_label = |date: &NaiveDate| date.format("%Y-%m").to_string();
        let count_label = |v: &f64| format!("{v:.0}");
        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&date_label)
            .y_label_formatter(&count_label)
            .axis_desc_style((style.axis_font.family.as_str(), style.axis_font.size))
            .label_style((style.label_font.family.as_str(), style.label_font.size));
        if let Some(x_label) = &config.x_label {
            mesh.x_desc(x_label);
        }
        if let Some(y_label) = &config.y_label {
            mesh.y_desc(y_label);
        }
        if let Some(grid_color) = &style.grid.color {
            mesh.light_line_style(self.parse_color(grid_color));
        }
        match (style.grid.show_x, style.grid.show_y) {
            (true, true) => mesh.draw()?,
            (true, false) => mesh.disable_y_mesh().draw()?,
            (false, true) => mesh.disable_x_mesh().draw()?,
            (false, false) => mesh.disable_mesh().draw()?,
        }

        let line_color = self.color_at(&style.color_scheme, 0);
        chart.draw_series(LineSeries::new(
            self.data.iter().map(|r| (r.date, r.value as f64)),
            line_color.stroke_width(1),
        ))?;

        root.present()?;
        tracing::info!(points = self.data.len(), path = %path.display(), "Rendered daily line chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_from_series_keeps_order_and_values() {
        let graph = DailyPageViewGraph::from_series(&series(&[
            ("2016-05-10", 20),
            ("2016-05-09", 10),
            ("2016-05-11", 15),
        ]))
        .unwrap();

        let values: Vec<u64> = graph.data().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![10, 20, 15]);
        assert_eq!(graph.max_value(), 20.0);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let result = DailyPageViewGraph::from_series(&PageViewSeries::default());
        assert!(matches!(result, Err(PageViewError::EmptyDataset { .. })));
    }

    #[test]
    fn test_single_day_range_is_widened() {
        let graph = DailyPageViewGraph::from_series(&series(&[("2019-12-03", 7)])).unwrap();
        let (start, end) = graph.date_range();
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn test_default_config() {
        let config = DailyPageViewGraph::default_config();
        assert_eq!(config.graph_type, GraphType::Line);
        assert_eq!(config.title, LINE_PLOT_TITLE);
        assert_eq!(config.x_label.as_deref(), Some("Date"));
        assert_eq!(config.y_label.as_deref(), Some("Page Views"));
        assert_eq!((config.width, config.height), (2000, 1000));
        assert_eq!(
            DailyPageViewGraph::from_series(&series(&[("2019-12-03", 7)]))
                .unwrap()
                .color_at(&config.style.color_scheme, 0),
            RGBColor(255, 0, 0)
        );
    }

    #[test]
    fn test_render_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("line_plot.png");

        let rows: Vec<(String, u64)> = (1..=28)
            .map(|d| (format!("2018-02-{d:02}"), 1000 + (d as u64 * 37) % 400))
            .collect();
        let borrowed: Vec<(&str, u64)> = rows.iter().map(|(d, v)| (d.as_str(), *v)).collect();
        let graph = DailyPageViewGraph::from_series(&series(&borrowed)).unwrap();

        let mut config = DailyPageViewGraph::default_config();
        config.width = 800;
        config.height = 400;

        let result = graph.render_to_file(&config, &path);
        assert!(result.is_ok(), "Failed to render graph: {:?}", result.err());
        assert!(path.exists(), "Graph file was not created");
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 1000, "Generated graph file is too small");
    }
}
