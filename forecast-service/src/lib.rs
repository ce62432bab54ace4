//! Cached weather forecasts for a configurable location, served as raw
//! provider JSON, a mapped view model, or a rendered HTML block.

pub mod api_client;
pub mod cache;
pub mod config;
pub mod display;
pub mod handlers;
pub mod location;
pub mod mapper;
pub mod openapi;
pub mod render;
pub mod service;
pub mod settings;

use axum::{Router, routing::get};
use common::errors::AppError;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api_client::WeatherApiClient;
use crate::cache::ForecastCache;
use crate::config::Config;
use crate::handlers::AppState;
use crate::service::ForecastService;
use crate::settings::Settings;

/// Wire the pipeline from configuration.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let cache = Arc::new(ForecastCache::new(config.stale_policy));
    let client = Arc::new(WeatherApiClient::new(
        config.weather_api_url.clone(),
        Duration::from_secs(config.provider_timeout_seconds),
    )?);
    let settings = Arc::new(Settings::from_config(config));

    Ok(AppState {
        service: Arc::new(ForecastService::new(cache, client, settings)),
    })
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/weather/v1/data", get(handlers::get_data))
        .route("/weather/v1/view", get(handlers::get_view))
        .route("/weather/v1/render", get(handlers::render))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
