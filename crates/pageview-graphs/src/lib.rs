//! # Page-View Graphs
//!
//! Loading, outlier removal and chart rendering for daily page-view series.
//!
//! A [`VisualizerPipeline`] loads the CSV export once, drops values outside
//! the configured quantile range and renders three PNG charts from the
//! cleaned series with plotters: the daily line chart, the monthly average
//! bar chart and the year/month box plots.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bar_plot;
pub mod box_plot;
pub mod calendar;
pub mod cleaner;
pub mod line_plot;
pub mod loader;
pub mod pipeline;
pub mod renderer;
pub mod types;

pub use bar_plot::*;
pub use box_plot::*;
pub use calendar::CalendarMonth;
pub use cleaner::{linear_quantile, CleanedSeries, OutlierFilter, QuantileBounds};
pub use line_plot::*;
pub use loader::{PageViewRecord, PageViewSeries};
pub use pipeline::{RenderSummary, RenderedGraph, VisualizerPipeline};
pub use renderer::GraphRenderer;
pub use types::*;
