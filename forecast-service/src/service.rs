use common::errors::AppError;
use common::models::ViewModel;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::api_client::WeatherApiClient;
use crate::cache::ForecastCache;
use crate::display::DisplayConfig;
use crate::mapper;
use crate::render;
use crate::settings::SettingsStore;

/// Cache-aside fetch, mapping and rendering for one request at a time.
pub struct ForecastService {
    cache: Arc<ForecastCache>,
    client: Arc<WeatherApiClient>,
    settings: Arc<dyn SettingsStore>,
}

impl ForecastService {
    pub fn new(
        cache: Arc<ForecastCache>,
        client: Arc<WeatherApiClient>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            cache,
            client,
            settings,
        }
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    /// Raw provider payload for `location`, from the cache when fresh.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn payload(&self, location: &str) -> Result<Value, AppError> {
        let api_key = self
            .settings
            .api_key()
            .ok_or_else(|| AppError::config_missing("Weather API key is not set"))?
            .to_string();
        let client = self.client.clone();
        let ttl = self.settings.cache_duration();

        self.cache
            .get_or_fetch(location, ttl, move |location| async move {
                client.fetch(&location, &api_key).await
            })
            .await
    }

    /// View model for one rendering; any failure degrades to `None`.
    pub async fn view(&self, config: &DisplayConfig) -> Option<ViewModel> {
        match self.payload(&config.location).await {
            Ok(payload) => mapper::map(Some(&payload), config),
            Err(e) => {
                warn!(location = %config.location, error = %e, "Weather data unavailable");
                None
            }
        }
    }

    pub async fn render(&self, config: &DisplayConfig) -> String {
        let view = self.view(config).await;
        render::render(view.as_ref(), config)
    }
}
