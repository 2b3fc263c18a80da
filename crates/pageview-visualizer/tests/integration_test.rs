//! Integration tests for pageview-visualizer crate.

use pageview_common::test_utils::pageview_fixtures::{daily_csv, write_csv};
use pageview_common::test_utils::{create_temp_dir, init_test_logging};
use pageview_common::PageViewError;
use pageview_config::{CanvasConfig, VisualizerConfig};
use pageview_visualizer::{run, VisualizerError};
use std::path::Path;

fn small_config(dir: &Path, input: &Path) -> VisualizerConfig {
    let mut config = VisualizerConfig::default();
    config.input.path = input.to_path_buf();
    config.output.line_plot = dir.join("out/line_plot.png");
    config.output.bar_plot = dir.join("out/bar_plot.png");
    config.output.box_plot = dir.join("out/box_plot.png");
    config.charts.line = CanvasConfig::new(800, 400);
    config.charts.bar = CanvasConfig::new(800, 450);
    config.charts.box_plot = CanvasConfig::new(1200, 400);
    config
}

#[test]
fn test_run_writes_all_graphs() {
    init_test_logging();
    let dir = create_temp_dir();
    let values: Vec<u64> = (0..120).map(|i| 10_000 + (i * 131) % 2_500).collect();
    let start = chrono_date(2018, 11, 1);
    let input = write_csv(dir.path(), "pageviews.csv", &daily_csv(start, &values));

    let summary = run(small_config(dir.path(), &input)).unwrap();

    assert_eq!(summary.loaded, 120);
    for path in summary.paths() {
        assert!(path.exists(), "missing {}", path.display());
    }
    assert_eq!(summary.bar.graph.years(), &[2018, 2019]);
}

#[test]
fn test_run_reports_malformed_rows() {
    init_test_logging();
    let dir = create_temp_dir();
    let input = write_csv(dir.path(), "bad.csv", "date,value\n2019-01-01,10\n2019-01-02,ten\n");

    let err = run(small_config(dir.path(), &input)).unwrap_err();
    match err {
        VisualizerError::Pipeline(PageViewError::Parse { line, ref column, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(column, "value");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_run_missing_input() {
    let dir = create_temp_dir();
    let err = run(small_config(dir.path(), &dir.path().join("nope.csv"))).unwrap_err();
    assert!(err.to_string().contains("nope.csv"));
}

fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
