use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Temperature unit chosen for a rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// `F` selects Fahrenheit; any other code falls back to Celsius.
    pub fn from_code(code: &str) -> Self {
        match code {
            "F" => Self::Fahrenheit,
            _ => Self::Celsius,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// One decimal and the unit, e.g. `15.0 °C`
    pub fn format(&self, value: f64) -> String {
        format!("{:.1} °{}", value, self.label())
    }
}

/// Wind-speed unit chosen for a rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "km/h")]
    Kph,
    #[serde(rename = "mph")]
    Mph,
}

impl SpeedUnit {
    /// `mph` selects miles per hour; any other code falls back to km/h.
    pub fn from_code(code: &str) -> Self {
        match code {
            "mph" => Self::Mph,
            _ => Self::Kph,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Kph => "km/h",
            Self::Mph => "mph",
        }
    }
}

/// Where the current-conditions icon sits relative to the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

impl IconPosition {
    pub fn from_code(code: &str) -> Self {
        match code {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            _ => Self::Right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Current conditions, already reduced to the requested units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature: f64,
    pub temperature_unit: TemperatureUnit,
    pub wind_speed: f64,
    pub speed_unit: SpeedUnit,
    pub condition: String,
    pub icon: String,
    pub icon_position: IconPosition,
}

/// One hour of the first forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourlyEntry {
    /// Display time, `HH:MM`
    pub time: String,
    pub temperature: f64,
    pub temperature_unit: TemperatureUnit,
    pub condition: String,
    pub icon: String,
}

/// Everything a renderer needs for one weather block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ViewModel {
    pub current: CurrentConditions,
    /// Present only when extra information was requested
    pub hourly: Option<Vec<HourlyEntry>>,
}

/// Service status, including whether the settings are usable
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub api_key_configured: bool,
    pub cache_duration_minutes: u64,
}
