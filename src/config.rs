//! Configuration management for Floodgate.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{FloodgateError, Result};

/// Settings for a [`RateLimiter`](crate::ratelimit::RateLimiter).
///
/// Settings are fixed at limiter construction; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterSettings {
    /// Length of the counting window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Maximum admitted requests per identifier per window
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u64,

    /// Minimum time between eviction sweeps in milliseconds.
    /// Defaults to one window length when unset.
    #[serde(default)]
    pub sweep_interval_ms: Option<u64>,
}

impl Default for LimiterSettings {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests_per_window: default_max_requests(),
            sweep_interval_ms: None,
        }
    }
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_requests() -> u64 {
    10
}

impl LimiterSettings {
    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading limiter settings");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: LimiterSettings = serde_yaml::from_str(yaml)
            .map_err(|e| FloodgateError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a usable limiter.
    pub fn validate(&self) -> Result<()> {
        if self.window_ms == 0 {
            return Err(FloodgateError::Config(
                "window_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_requests_per_window == 0 {
            return Err(FloodgateError::Config(
                "max_requests_per_window must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval_ms == Some(0) {
            return Err(FloodgateError::Config(
                "sweep_interval_ms must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }

    /// The counting window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// The minimum spacing between eviction sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.unwrap_or(self.window_ms))
    }
}
