use common::models::{IconPosition, ViewModel};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use uuid::Uuid;

use crate::display::DisplayConfig;

/// The only output when there is nothing to show.
pub const FALLBACK_TEXT: &str = "Weather data not available.";

/// Render a weather block, or the fallback text when `view` is `None`.
pub fn render(view: Option<&ViewModel>, config: &DisplayConfig) -> String {
    match view {
        Some(view) => render_view(view, config, &section_id()),
        None => FALLBACK_TEXT.to_string(),
    }
}

// Ties the toggle button to the hourly section it controls.
fn section_id() -> String {
    format!("p-{}", Uuid::new_v4().simple())
}

fn render_view(view: &ViewModel, config: &DisplayConfig, section_id: &str) -> String {
    let current = &view.current;
    let mut html = String::from("<div class=\"wp-block-forecast\">\n");

    let icon = format!(
        "<img class=\"weather-icon\" src=\"{}\" alt=\"{}\" style=\"height:{size}px;width:{size}px\">",
        attr(&current.icon),
        attr(&current.condition),
        size = config.icon_size,
    );
    let style = &config.title_style;
    let heading = config
        .title
        .clone()
        .unwrap_or_else(|| capitalize(&current.location));
    let title = format!(
        "<div class=\"weather-title-content\"><h3 style=\"color:{};font-size:{}px;font-weight:{}\">{}</h3></div>",
        attr(&style.color),
        style.size,
        attr(&style.font_weight),
        text(&heading),
    );

    html.push_str(&format!(
        "<div class=\"weather-header icon-position-{}\">\n",
        current.icon_position.as_str()
    ));
    match current.icon_position {
        IconPosition::Top | IconPosition::Left => {
            html.push_str(&format!("{}\n{}\n", icon, title));
        }
        IconPosition::Right | IconPosition::Bottom => {
            html.push_str(&format!("{}\n{}\n", title, icon));
        }
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<p>Temperature: {}<br>Wind: {} {}<br>Condition: {}</p>\n",
        current.temperature_unit.format(current.temperature),
        current.wind_speed,
        current.speed_unit.label(),
        text(&current.condition),
    ));

    if let Some(hourly) = &view.hourly {
        let id = attr(section_id);
        html.push_str(&format!(
            "<button type=\"button\" class=\"toggle-button\" aria-expanded=\"false\" aria-controls=\"{}\">View forecast</button>\n",
            id
        ));
        html.push_str(&format!("<div id=\"{}\" class=\"forecast\" hidden>\n", id));
        for hour in hourly {
            html.push_str(&format!(
                "<p>{}: {} <img class=\"weather-icon\" src=\"{}\" alt=\"{}\"></p>\n",
                text(&hour.time),
                hour.temperature_unit.format(hour.temperature),
                attr(&hour.icon),
                attr(&hour.condition),
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>");
    html
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::{CurrentConditions, HourlyEntry, SpeedUnit, TemperatureUnit};

    fn view(hourly: Option<Vec<HourlyEntry>>) -> ViewModel {
        ViewModel {
            current: CurrentConditions {
                location: "london".to_string(),
                temperature: 15.0,
                temperature_unit: TemperatureUnit::Celsius,
                wind_speed: 10.0,
                speed_unit: SpeedUnit::Kph,
                condition: "Cloudy".to_string(),
                icon: "//x/cloudy.png".to_string(),
                icon_position: IconPosition::Right,
            },
            hourly,
        }
    }

    fn hour() -> HourlyEntry {
        HourlyEntry {
            time: "13:00".to_string(),
            temperature: 14.0,
            temperature_unit: TemperatureUnit::Celsius,
            condition: "Cloudy".to_string(),
            icon: "i.png".to_string(),
        }
    }

    #[test]
    fn fallback_is_bare_text() {
        assert_eq!(
            render(None, &DisplayConfig::default()),
            "Weather data not available."
        );
    }

    #[test]
    fn renders_current_conditions() {
        let html = render(Some(&view(None)), &DisplayConfig::default());
        assert!(html.contains("Temperature: 15.0 °C"));
        assert!(html.contains("Wind: 10 km/h"));
        assert!(html.contains("Condition: Cloudy"));
        assert!(html.contains("<h3 style=\"color:#000;font-size:20px;font-weight:normal\">London</h3>"));
        assert!(html.contains("src=\"//x/cloudy.png\""));
        assert!(html.contains("icon-position-right"));
        assert!(!html.contains("toggle-button"));
        assert!(!html.contains(FALLBACK_TEXT));
    }

    #[test]
    fn toggle_controls_hourly_section() {
        let html = render_view(&view(Some(vec![hour()])), &DisplayConfig::default(), "p-test");
        assert!(html.contains("aria-controls=\"p-test\""));
        assert!(html.contains("<div id=\"p-test\" class=\"forecast\" hidden>"));
        assert!(html.contains(
            "<p>13:00: 14.0 °C <img class=\"weather-icon\" src=\"i.png\" alt=\"Cloudy\"></p>"
        ));
    }

    #[test]
    fn section_ids_are_unique_per_render() {
        let model = view(Some(vec![hour()]));
        let config = DisplayConfig::default();
        let first = render(Some(&model), &config);
        let second = render(Some(&model), &config);

        let id_of = |html: &str| {
            let start = html.find("aria-controls=\"").unwrap() + "aria-controls=\"".len();
            let end = start + html[start..].find('"').unwrap();
            html[start..end].to_string()
        };
        let id = id_of(&first);
        assert!(id.starts_with("p-"));
        assert!(first.contains(&format!("<div id=\"{}\"", id)));
        assert_ne!(id, id_of(&second));
    }

    #[test]
    fn icon_position_orders_header() {
        let mut model = view(None);
        model.current.icon_position = IconPosition::Left;
        let html = render(Some(&model), &DisplayConfig::default());
        assert!(html.find("weather-icon").unwrap() < html.find("<h3").unwrap());

        model.current.icon_position = IconPosition::Bottom;
        let html = render(Some(&model), &DisplayConfig::default());
        assert!(html.find("<h3").unwrap() < html.find("weather-icon").unwrap());
        assert!(html.contains("icon-position-bottom"));
    }

    #[test]
    fn title_override_and_escaping() {
        let mut model = view(None);
        model.current.condition = "<script>alert(1)</script>".to_string();
        let config = DisplayConfig {
            title: Some("Tom & Jerry's \"place\"".to_string()),
            ..DisplayConfig::default()
        };
        let html = render(Some(&model), &config);
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Condition: &lt;script&gt;"));
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("new york"), "New york");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
