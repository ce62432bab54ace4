use common::models::{IconPosition, SpeedUnit, TemperatureUnit};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::location::display_location;

/// Per-rendering settings as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DisplayQuery {
    /// Location to show (defaults to London)
    pub location: Option<String>,
    /// `C` or `F`
    pub unit: Option<String>,
    /// `km/h` or `mph`
    pub speed_unit: Option<String>,
    /// `true` to include the hourly forecast
    pub extra_info: Option<String>,
    /// `top`, `right`, `bottom` or `left`
    pub icon_position: Option<String>,
    /// Heading to use instead of the location name
    pub title: Option<String>,
    pub title_color: Option<String>,
    pub title_size: Option<String>,
    pub title_font_weight: Option<String>,
    pub icon_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleStyle {
    pub color: String,
    pub size: u32,
    pub font_weight: String,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            color: "#000".to_string(),
            size: 20,
            font_weight: "normal".to_string(),
        }
    }
}

/// Settings for one rendering; fixed for its duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub location: String,
    pub unit: TemperatureUnit,
    pub speed_unit: SpeedUnit,
    pub show_extra: bool,
    pub icon_position: IconPosition,
    pub title: Option<String>,
    pub title_style: TitleStyle,
    pub icon_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayQuery::default().into()
    }
}

impl DisplayConfig {
    pub fn for_location(location: &str) -> Self {
        Self {
            location: display_location(Some(location)),
            ..Self::default()
        }
    }
}

impl From<DisplayQuery> for DisplayConfig {
    fn from(query: DisplayQuery) -> Self {
        let defaults = TitleStyle::default();

        Self {
            location: display_location(query.location.as_deref()),
            unit: TemperatureUnit::from_code(query.unit.as_deref().unwrap_or_default()),
            speed_unit: SpeedUnit::from_code(query.speed_unit.as_deref().unwrap_or_default()),
            show_extra: matches!(query.extra_info.as_deref(), Some("true") | Some("1")),
            icon_position: IconPosition::from_code(
                query.icon_position.as_deref().unwrap_or_default(),
            ),
            title: query
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            title_style: TitleStyle {
                color: query
                    .title_color
                    .filter(|c| is_css_color(c))
                    .unwrap_or(defaults.color),
                size: parse_clamped(query.title_size.as_deref(), defaults.size, 16, 150),
                font_weight: query
                    .title_font_weight
                    .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphanumeric()))
                    .unwrap_or(defaults.font_weight),
            },
            icon_size: parse_clamped(query.icon_size.as_deref(), 50, 32, 70),
        }
    }
}

fn parse_clamped(value: Option<&str>, default: u32, min: u32, max: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|v| v.clamp(min, max))
        .unwrap_or(default)
}

// Values land inside a style attribute.
fn is_css_color(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '))
}
