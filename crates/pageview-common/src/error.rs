//! Error types and utilities for the page-view visualizer

use thiserror::Error;

/// Result type alias for visualizer operations
pub type Result<T> = std::result::Result<T, PageViewError>;

/// Main error type for visualizer operations
#[derive(Error, Debug)]
pub enum PageViewError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader errors, including a missing header column
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A field that could not be parsed into a date or a page-view count
    #[error("Parse error at line {line}, column '{column}': {message}")]
    Parse {
        line: u64,
        column: String,
        message: String,
    },

    /// Statistics requested over a series with no records
    #[error("Empty dataset: {message}")]
    EmptyDataset { message: String },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for library inputs
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl PageViewError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new CSV error
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::Csv {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new parse error for a specific line and column
    pub fn parse(line: u64, column: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Create a new empty dataset error
    pub fn empty_dataset(msg: impl Into<String>) -> Self {
        Self::EmptyDataset {
            message: msg.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to PageViewError
impl From<csv::Error> for PageViewError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(pos) => format!("Malformed record at line {}", pos.line()),
            None => "Failed to read CSV input".to_string(),
        };
        Self::Csv {
            message,
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from toml::de::Error to PageViewError
impl From<toml::de::Error> for PageViewError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from serde_yaml::Error to PageViewError
impl From<serde_yaml::Error> for PageViewError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

/// Convert from serde_json::Error to PageViewError
impl From<serde_json::Error> for PageViewError {
    fn from(err: serde_json::Error) -> Self {
        Self::config_with_source("JSON parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to PageViewError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for PageViewError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = PageViewError::config("bad quantile");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("bad quantile"));

        let parse_error = PageViewError::parse(7, "date", "not a date");
        assert_eq!(
            parse_error.to_string(),
            "Parse error at line 7, column 'date': not a date"
        );

        let empty_error = PageViewError::empty_dataset("no records to clean");
        assert!(empty_error.to_string().contains("Empty dataset"));

        let validation_error = PageViewError::validation_field("must be positive", "width");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(matches!(
            validation_error,
            PageViewError::Validation { field: Some(ref f), .. } if f == "width"
        ));
    }

    #[test]
    fn test_error_with_source() {
        let config_source_error = PageViewError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Config loading failed"));
        assert!(config_source_error.source().is_some());

        let graph_error = PageViewError::graph("nothing to draw");
        assert!(graph_error.source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let converted: PageViewError = io_error.into();

        assert!(converted.to_string().contains("I/O error"));
        assert!(converted.source().is_some());
    }

    #[test]
    fn test_csv_error_conversion() {
        let data = "date,value\n2016-05-09,1201,extra\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let err = reader
            .records()
            .next()
            .expect("one record")
            .expect_err("unequal lengths must fail");

        let converted: PageViewError = err.into();
        assert!(matches!(converted, PageViewError::Csv { .. }));
        assert!(converted.source().is_some());
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let converted: PageViewError = err.into();
        assert!(converted.to_string().contains("TOML parsing error"));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = PageViewError::config_with_source("Middle layer", root_error);
        let top_error = PageViewError::graph_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
    }
}
