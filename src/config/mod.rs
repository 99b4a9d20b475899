pub mod output_config;
pub mod trace_config;

pub use output_config::{OutputConfig, OutputFormat};
pub use trace_config::TraceConfig;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "strqueue.yaml";

/// Main configuration structure matching strqueue.yaml format
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML config file")?;

        // Reject bad levels at load time rather than on first use
        config.trace.level()?;

        debug!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Load an explicit config file, or fall back to `strqueue.yaml` and then
    /// to defaults when it does not exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    info!("Config file not found, using defaults: {}", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }
}
