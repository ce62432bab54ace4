//! Reduces a raw provider payload to the fields one rendering shows.

use chrono::NaiveDateTime;
use common::errors::AppError;
use common::models::{CurrentConditions, HourlyEntry, SpeedUnit, TemperatureUnit, ViewModel};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::display::DisplayConfig;

#[derive(Debug, Deserialize)]
struct ConditionSection {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentSection {
    temp_c: Option<f64>,
    temp_f: Option<f64>,
    wind_kph: Option<f64>,
    wind_mph: Option<f64>,
    condition: ConditionSection,
}

#[derive(Debug, Deserialize)]
struct HourSection {
    time: String,
    temp_c: Option<f64>,
    temp_f: Option<f64>,
    condition: ConditionSection,
}

fn pick_temperature(
    unit: TemperatureUnit,
    celsius: Option<f64>,
    fahrenheit: Option<f64>,
) -> Option<f64> {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => fahrenheit,
    }
}

/// Map a payload onto the view model for `config`.
///
/// Returns `None` when there is nothing renderable: no payload, no usable
/// `current` section, or (with extra info requested) no usable hourly
/// forecast. A half-populated view is never produced.
pub fn map(payload: Option<&Value>, config: &DisplayConfig) -> Option<ViewModel> {
    match try_map(payload?, config) {
        Ok(view) => Some(view),
        Err(e) => {
            debug!(error = %e, "Payload not renderable");
            None
        }
    }
}

/// Like [`map`], but says which part of the payload was unusable.
pub fn try_map(payload: &Value, config: &DisplayConfig) -> Result<ViewModel, AppError> {
    let current = payload
        .get("current")
        .ok_or_else(|| AppError::malformed("no current section"))?;
    let current = CurrentSection::deserialize(current)
        .map_err(|e| AppError::malformed(format!("current section: {}", e)))?;

    let temperature = pick_temperature(config.unit, current.temp_c, current.temp_f)
        .ok_or_else(|| AppError::malformed("current temperature missing for unit"))?;
    let wind_speed = match config.speed_unit {
        SpeedUnit::Kph => current.wind_kph,
        SpeedUnit::Mph => current.wind_mph,
    }
    .ok_or_else(|| AppError::malformed("current wind speed missing for unit"))?;

    let hourly = if config.show_extra {
        Some(map_hourly(payload, config.unit)?)
    } else {
        None
    };

    Ok(ViewModel {
        current: CurrentConditions {
            location: config.location.clone(),
            temperature,
            temperature_unit: config.unit,
            wind_speed,
            speed_unit: config.speed_unit,
            condition: current.condition.text,
            icon: current.condition.icon,
            icon_position: config.icon_position,
        },
        hourly,
    })
}

// Hours of the first forecast day, in the order the provider sent them.
fn map_hourly(payload: &Value, unit: TemperatureUnit) -> Result<Vec<HourlyEntry>, AppError> {
    let hours = payload
        .pointer("/forecast/forecastday/0/hour")
        .ok_or_else(|| AppError::malformed("no hourly forecast for the first day"))?;
    let hours = Vec::<HourSection>::deserialize(hours)
        .map_err(|e| AppError::malformed(format!("hourly forecast: {}", e)))?;

    hours
        .into_iter()
        .map(|hour| {
            Ok(HourlyEntry {
                temperature: pick_temperature(unit, hour.temp_c, hour.temp_f).ok_or_else(
                    || AppError::malformed(format!("hour {} has no temperature", hour.time)),
                )?,
                time: display_time(&hour.time),
                temperature_unit: unit,
                condition: hour.condition.text,
                icon: hour.condition.icon,
            })
        })
        .collect()
}

/// `2024-01-01 13:00` becomes `13:00`.
pub fn display_time(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp.trim(), "%Y-%m-%d %H:%M") {
        Ok(parsed) => parsed.format("%H:%M").to_string(),
        Err(_) => timestamp
            .split_once(' ')
            .map(|(_, time)| time)
            .unwrap_or(timestamp)
            .to_string(),
    }
}
