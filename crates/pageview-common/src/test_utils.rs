//! Test utilities and shared test helpers for the visualizer workspace.
//!
//! Provides logging setup for tests, temporary directories, and CSV fixtures
//! shaped like the daily page-view export the pipeline consumes.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// CSV fixtures in the `date,value` layout of the page-view export.
pub mod pageview_fixtures {
    use chrono::{Datelike, Duration, NaiveDate};
    use std::fmt::Write as _;
    use std::path::{Path, PathBuf};

    /// Header line shared by every fixture.
    pub const HEADER: &str = "date,value";

    /// Render explicit `(date, value)` rows as CSV text.
    pub fn csv_from_rows(rows: &[(&str, u64)]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (date, value) in rows {
            let _ = writeln!(out, "{date},{value}");
        }
        out
    }

    /// Render consecutive daily values starting at `start` as CSV text.
    pub fn daily_csv(start: NaiveDate, values: &[u64]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (offset, value) in values.iter().enumerate() {
            let date = start + Duration::days(offset as i64);
            let _ = writeln!(out, "{},{}", date.format("%Y-%m-%d"), value);
        }
        out
    }

    /// Deterministic daily values between `start` and `end` inclusive.
    ///
    /// Values grow by year and peak in the autumn months so yearly and
    /// seasonal box plots have something to show. No randomness is involved.
    pub fn seasonal_series(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, u64)> {
        let mut rows = Vec::new();
        let mut date = start;
        while date <= end {
            let year_factor = u64::try_from(date.year() - start.year()).unwrap_or(0) * 15_000;
            let month_factor = match date.month() {
                9..=11 => 12_000,
                6..=8 => 2_000,
                _ => 6_000,
            };
            let day_wobble = u64::from(date.day() * 37 % 101) * 40;
            rows.push((date, 20_000 + year_factor + month_factor + day_wobble));
            date += Duration::days(1);
        }
        rows
    }

    /// Render dated rows as CSV text.
    pub fn csv_from_series(rows: &[(NaiveDate, u64)]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (date, value) in rows {
            let _ = writeln!(out, "{},{}", date.format("%Y-%m-%d"), value);
        }
        out
    }

    /// Write CSV text into `dir` and return the full path.
    pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("Failed to write CSV fixture");
        path
    }
}
