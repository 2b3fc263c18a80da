//! Integration tests for pageview-config crate.

use pageview_common::test_utils::{create_temp_dir, init_test_logging};
use pageview_common::PageViewError;
use pageview_config::{ConfigLoader, LogFormat, VisualizerConfig};
use std::path::Path;

#[test]
fn test_load_toml_file() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = dir.path().join("visualizer.toml");
    std::fs::write(
        &path,
        r#"
[input]
path = "data/pageviews.csv"

[charts.box_plot]
width = 1600
height = 500

[logging]
level = "debug"
format = "pretty"
"#,
    )
    .unwrap();

    let loader = ConfigLoader::new(&path);
    assert_eq!(loader.path(), path.as_path());

    let config = loader.load().expect("config should load");
    assert_eq!(config.input.path, Path::new("data/pageviews.csv"));
    assert_eq!(config.charts.box_plot.width, 1600);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.output, VisualizerConfig::default().output);
}

#[test]
fn test_serialized_defaults_load_back() {
    let dir = create_temp_dir();
    let path = dir.path().join("visualizer.yaml");
    let yaml = serde_yaml::to_string(&VisualizerConfig::default()).unwrap();
    std::fs::write(&path, yaml).unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert_eq!(config, VisualizerConfig::default());
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = create_temp_dir();
    let result = ConfigLoader::new(dir.path().join("absent.toml")).load();
    assert!(matches!(result, Err(PageViewError::Config { .. })));
}
