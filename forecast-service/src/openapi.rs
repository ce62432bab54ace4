use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{
    CurrentConditions, HealthResponse, HourlyEntry, IconPosition, SpeedUnit, TemperatureUnit,
    ViewModel,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_data,
        handlers::get_view,
        handlers::render,
    ),
    components(schemas(
        HealthResponse,
        ViewModel,
        CurrentConditions,
        HourlyEntry,
        TemperatureUnit,
        SpeedUnit,
        IconPosition,
    )),
    tags(
        (name = "weather", description = "Cached forecast data and rendering"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
