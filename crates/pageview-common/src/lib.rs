//! Common error handling, logging and test utilities for the page-view visualizer

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{PageViewError, Result};
pub use logging::{init_logging, LoggingConfig, LoggingError};
