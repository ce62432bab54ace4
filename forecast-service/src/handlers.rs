use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use axum_extra::extract::Query;
use common::errors::AppError;
use common::models::{HealthResponse, ViewModel};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::IntoParams;

use crate::display::{DisplayConfig, DisplayQuery};
use crate::render::FALLBACK_TEXT;
use crate::service::ForecastService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health and settings status", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.service.settings();
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "forecast-service".to_string(),
        api_key_configured: settings.api_key().is_some(),
        cache_duration_minutes: settings.cache_duration().as_secs() / 60,
    })
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DataQuery {
    /// Location to fetch the forecast for
    pub location: Option<String>,
}

#[utoipa::path(
    get,
    path = "/weather/v1/data",
    params(DataQuery),
    responses(
        (status = 200, description = "Provider forecast payload, unmodified"),
        (status = 400, description = "No location given"),
        (status = 500, description = "Forecast could not be fetched")
    ),
    tag = "weather"
)]
pub async fn get_data(
    State(state): State<AppState>,
    Query(params): Query<DataQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let location = params
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::validation("location is required"))?;

    info!(location = %location, "Forecast data request received");

    let payload = state.service.payload(&location).await?;

    Ok(Json(payload))
}

#[utoipa::path(
    get,
    path = "/weather/v1/view",
    params(DisplayQuery),
    responses(
        (status = 200, description = "Mapped view model", body = ViewModel),
        (status = 404, description = "Weather data not available")
    ),
    tag = "weather"
)]
pub async fn get_view(
    State(state): State<AppState>,
    Query(params): Query<DisplayQuery>,
) -> Response {
    let config = DisplayConfig::from(params);
    info!(location = %config.location, "View request received");

    match state.service.view(&config).await {
        Some(view) => Json(view).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": FALLBACK_TEXT })),
        )
            .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/weather/v1/render",
    params(DisplayQuery),
    responses(
        (status = 200, description = "Rendered weather block, or the fallback text", body = String, content_type = "text/html")
    ),
    tag = "weather"
)]
pub async fn render(
    State(state): State<AppState>,
    Query(params): Query<DisplayQuery>,
) -> Html<String> {
    let config = DisplayConfig::from(params);
    info!(location = %config.location, "Render request received");

    Html(state.service.render(&config).await)
}
