use std::time::Duration;

use crate::config::{Config, DEFAULT_CACHE_DURATION_MINUTES, MAX_CACHE_DURATION_MINUTES};

/// Read-only view of the operator settings consumed by the pipeline.
pub trait SettingsStore: Send + Sync {
    /// The provider API key, if one is configured.
    fn api_key(&self) -> Option<&str>;

    /// How long a fetched forecast stays fresh.
    fn cache_duration(&self) -> Duration;
}

/// Settings fixed at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    api_key: Option<String>,
    cache_duration_minutes: u64,
}

impl Settings {
    pub fn new(api_key: Option<String>, cache_duration_minutes: u64) -> Self {
        let cache_duration_minutes = match cache_duration_minutes {
            0 => DEFAULT_CACHE_DURATION_MINUTES,
            minutes => minutes.min(MAX_CACHE_DURATION_MINUTES),
        };
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            cache_duration_minutes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.weather_api_key.clone(), config.cache_duration_minutes)
    }

    pub fn cache_duration_minutes(&self) -> u64 {
        self.cache_duration_minutes
    }
}

impl SettingsStore for Settings {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_minutes.saturating_mul(60))
    }
}
