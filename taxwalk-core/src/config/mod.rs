//! Configuration types for taxwalk

use crate::system::taxwalk_config_path;
use crate::TaxwalkError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How a resolved lineage is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Joins the `name(rank)` segments of a rendered lineage
    #[serde(default = "default_separator")]
    pub separator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when TAXWALK_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

// Default value functions
fn default_separator() -> String {
    " -> ".to_string()
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            separator: default_separator(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, TaxwalkError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxwalkError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), TaxwalkError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxwalkError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Load TAXWALK_HOME/config.toml, or defaults when no file exists there
pub fn load_or_default() -> Result<Config, TaxwalkError> {
    let path = taxwalk_config_path();
    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        load_config(path)
    } else {
        Ok(Config::default())
    }
}
