//! Application-wide error types using thiserror.

use pageview_common::{LoggingError, PageViewError};

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum VisualizerError {
    /// Loading, cleaning or rendering failed.
    #[error(transparent)]
    Pipeline(#[from] PageViewError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[source] LoggingError),
}

/// Result type for the visualizer application.
pub type VisualizerResult<T> = Result<T, VisualizerError>;
