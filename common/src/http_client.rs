use crate::errors::AppError;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// HTTP client with an overall request timeout; one attempt per call.
///
/// URLs may carry credentials in the query string, so they are never logged.
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Fetch and decode a JSON body.
    #[instrument(skip(self, url), fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.fetch_with_timeout(url).await {
            Ok(response) => {
                info!("Request successful");
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "Request failed");
                Err(e)
            }
        }
    }

    async fn fetch_with_timeout<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| AppError::timeout(format!("No response within {:?}", self.timeout)))?
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::timeout(format!("No response within {:?}", self.timeout))
                } else {
                    AppError::ProviderUnreachable(e.without_url())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::provider(
                status.as_u16(),
                format!("HTTP error: {}", status),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::ProviderUnreachable(e.without_url()))?;
        serde_json::from_str(&text).map_err(|e| {
            AppError::provider(status.as_u16(), format!("Unparsable response body: {}", e))
        })
    }
}
