use common::errors::AppError;
use common::http_client::HttpClient;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument};

use crate::location::provider_query;

/// Client for the WeatherAPI.com `forecast.json` endpoint.
///
/// One attempt per call; the payload comes back undecoded beyond JSON.
pub struct WeatherApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl WeatherApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }

    #[instrument(skip(self, api_key), fields(location = %location))]
    pub async fn fetch(&self, location: &str, api_key: &str) -> Result<Value, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::config_missing("Weather API key is not set"));
        }

        info!(location = %location, "Fetching forecast from provider");

        self.http_client
            .get_json(&self.forecast_url(location, api_key))
            .await
    }

    fn forecast_url(&self, location: &str, api_key: &str) -> String {
        format!(
            "{}?key={}&q={}&aqi=no",
            self.base_url,
            urlencoding::encode(api_key),
            urlencoding::encode(&provider_query(location))
        )
    }
}
