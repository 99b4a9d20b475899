use crate::queue::TracingObserver;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::Level;

// Registry diagnostics section of strqueue.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct TraceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            level: default_level(),
        }
    }
}

impl TraceConfig {
    /// Parse the configured level name (trace, debug, info, warn, error)
    pub fn level(&self) -> Result<Level> {
        self.level
            .parse::<Level>()
            .map_err(|e| anyhow!("Invalid trace level '{}': {}", self.level, e))
    }

    /// Observer to attach to the registry, if tracing is enabled
    pub fn observer(&self) -> Result<Option<TracingObserver>> {
        if !self.enabled {
            return Ok(None);
        }
        Ok(Some(TracingObserver::new(self.level()?)))
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "debug".to_string()
}
