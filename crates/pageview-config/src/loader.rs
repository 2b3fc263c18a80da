//! Configuration loading from TOML, YAML or JSON documents.

use crate::schema::VisualizerConfig;
use crate::validator::ConfigValidator;
use pageview_common::{PageViewError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(PageViewError::config(format!(
                "unsupported configuration file '{}': expected .toml, .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

/// Configuration loader bound to a single document path.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the configuration document.
    pub fn load(&self) -> Result<VisualizerConfig> {
        let format = ConfigFormat::from_path(&self.path)?;
        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            PageViewError::config_with_source(
                format!("failed to read '{}'", self.path.display()),
                err,
            )
        })?;
        debug!(path = %self.path.display(), ?format, "loading configuration");
        Self::parse(&content, format)
    }

    /// Parses and validates a configuration document held in memory.
    ///
    /// Missing sections and fields take their default values.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<VisualizerConfig> {
        let config: VisualizerConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Returns the validated built-in configuration.
    pub fn defaults() -> Result<VisualizerConfig> {
        let config = VisualizerConfig::default();
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
