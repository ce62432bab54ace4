use std::env;

use crate::cache::StalePolicy;

pub const DEFAULT_CACHE_DURATION_MINUTES: u64 = 30;
/// Longest cache duration offered by the settings, twelve hours.
pub const MAX_CACHE_DURATION_MINUTES: u64 = 720;

pub struct Config {
    pub port: u16,
    pub weather_api_url: String,
    pub weather_api_key: Option<String>,
    pub cache_duration_minutes: u64,
    pub provider_timeout_seconds: u64,
    pub stale_policy: StalePolicy,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source; unset or
    /// unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3002),
            weather_api_url: lookup("WEATHER_API_URL").unwrap_or_else(|| {
                "https://api.weatherapi.com/v1/forecast.json".to_string()
            }),
            weather_api_key: lookup("WEATHER_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            cache_duration_minutes: lookup("CACHE_DURATION_MINUTES")
                .and_then(|m| m.parse().ok())
                .filter(|m| *m > 0)
                .map(|m: u64| m.min(MAX_CACHE_DURATION_MINUTES))
                .unwrap_or(DEFAULT_CACHE_DURATION_MINUTES),
            provider_timeout_seconds: lookup("PROVIDER_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(10),
            stale_policy: match lookup("STALE_ON_ERROR").as_deref() {
                Some("1") | Some("true") | Some("yes") => StalePolicy::OnError,
                _ => StalePolicy::Never,
            },
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
        }
    }
}
