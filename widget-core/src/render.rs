//! Pure payload-to-regions mapping.
//!
//! Every render assigns all seven regions; there are no partial updates. The
//! branch taken depends only on whether the payload carries an error field.
//!
//! One inherited quirk is preserved on purpose: the dual-unit temperature
//! branch treats a value of exactly zero as absent, while the single-unit
//! temperature, humidity, and wind-kph branches each have their own presence
//! rule. Intent is unverifiable, so the behavior stays field-exact.

use crate::icon::{self, Icon};
use crate::payload::RawPayload;

/// Shown in any region that has nothing to display.
pub const PLACEHOLDER: &str = "—";

/// The seven text regions of the widget, produced atomically per payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions {
    pub location: String,
    pub condition: String,
    pub icon: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub footer: String,
}

impl Default for Regions {
    fn default() -> Self {
        Self {
            location: PLACEHOLDER.to_string(),
            condition: PLACEHOLDER.to_string(),
            icon: Icon::PartlyCloudy.symbol().to_string(),
            temperature: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            wind: PLACEHOLDER.to_string(),
            footer: PLACEHOLDER.to_string(),
        }
    }
}

/// The widget's rendered view: text regions plus the presentation theme.
/// Created once with placeholder content and mutated for the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub regions: Regions,
    pub theme: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self { regions: Regions::default(), theme: "dark".to_string() }
    }
}

impl DisplayState {
    /// Overwrite all regions at once. Theme is untouched by rendering.
    pub fn apply(&mut self, regions: Regions) {
        self.regions = regions;
    }

    /// Missing theme falls back to dark.
    pub fn set_theme(&mut self, theme: Option<&str>) {
        self.theme = theme.unwrap_or("dark").to_string();
    }
}

/// Render a raw payload into a complete set of regions.
pub fn render(payload: &RawPayload) -> Regions {
    if let Some(error) = payload.error() {
        return render_error(payload, error);
    }

    let condition = payload.condition();

    Regions {
        location: non_empty(payload.location()).unwrap_or("Unknown").to_string(),
        condition: non_empty(condition).unwrap_or("Unknown").to_string(),
        icon: icon::classify(condition).symbol().to_string(),
        temperature: temperature_text(payload.temperature_f(), payload.temperature_c()),
        humidity: humidity_text(payload.humidity_percent()),
        wind: wind_text(payload.wind(), payload.wind_kph()),
        footer: footer_text(payload.reported_at_utc(), payload.source()),
    }
}

/// A failure report replaces the whole display; only location and source
/// survive from the payload.
fn render_error(payload: &RawPayload, error: &str) -> Regions {
    Regions {
        location: non_empty(payload.location()).unwrap_or("Error").to_string(),
        condition: error.to_string(),
        icon: Icon::Warning.symbol().to_string(),
        temperature: PLACEHOLDER.to_string(),
        humidity: PLACEHOLDER.to_string(),
        wind: PLACEHOLDER.to_string(),
        footer: format!("Source: {}", non_empty(payload.source()).unwrap_or("weather API")),
    }
}

fn temperature_text(temp_f: Option<f64>, temp_c: Option<f64>) -> String {
    match (temp_f, temp_c) {
        // Inherited quirk: the dual-unit branch requires both values to be
        // non-zero, so 0°F or 0°C drops down to a single-unit line.
        (Some(f), Some(c)) if f != 0.0 && c != 0.0 => {
            format!("{}°F / {}°C", format_number(f), format_number(c))
        }
        (Some(f), _) => format!("{}°F", format_number(f)),
        (None, Some(c)) => format!("{}°C", format_number(c)),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

fn humidity_text(humidity: Option<f64>) -> String {
    // Explicit presence, not truthiness: zero humidity renders as "0%".
    match humidity {
        Some(h) => format!("{}%", format_number(h)),
        None => PLACEHOLDER.to_string(),
    }
}

fn wind_text(wind: Option<&str>, wind_kph: Option<f64>) -> String {
    match non_empty(wind) {
        Some(w) => w.to_string(),
        // Truthiness on the numeric fallback: 0 km/h renders as a dash.
        None => match wind_kph {
            Some(kph) if kph != 0.0 => format!("{} km/h", format_number(kph)),
            _ => PLACEHOLDER.to_string(),
        },
    }
}

fn footer_text(reported_at: Option<&str>, source: Option<&str>) -> String {
    match non_empty(reported_at) {
        Some(ts) => format!("Reported {ts} · {}", non_empty(source).unwrap_or("weather")),
        None => format!("Source: {}", non_empty(source).unwrap_or("weather API")),
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// JSON numbers arrive as f64; whole values print without a fraction.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(value: serde_json::Value) -> Regions {
        let payload = RawPayload::from_json(&value.to_string()).expect("valid payload");
        render(&payload)
    }

    #[test]
    fn data_payload_renders_all_regions() {
        let regions = rendered(json!({
            "location": "Seattle, Washington, United States",
            "condition": "Rain showers",
            "temperatureF": 54,
            "temperatureC": 12,
            "humidityPercent": 88,
            "wind": "14 km/h SW",
            "reportedAtUtc": "2024-01-01 12:00:00Z",
            "source": "open-meteo",
        }));

        assert_eq!(regions.location, "Seattle, Washington, United States");
        assert_eq!(regions.condition, "Rain showers");
        assert_eq!(regions.icon, Icon::Rain.symbol());
        assert_eq!(regions.temperature, "54°F / 12°C");
        assert_eq!(regions.humidity, "88%");
        assert_eq!(regions.wind, "14 km/h SW");
        assert_eq!(regions.footer, "Reported 2024-01-01 12:00:00Z · open-meteo");
    }

    #[test]
    fn error_payload_blanks_everything_but_location_and_source() {
        let regions = rendered(json!({
            "Location": "Atlantis",
            "Error": "Could not find this location. Try a city, address, or zip code.",
            "Source": "open-meteo",
            // Populated fields must not leak through on the error branch.
            "temperatureF": 70,
            "humidityPercent": 50,
            "wind": "Calm",
        }));

        assert_eq!(regions.location, "Atlantis");
        assert_eq!(
            regions.condition,
            "Could not find this location. Try a city, address, or zip code."
        );
        assert_eq!(regions.icon, Icon::Warning.symbol());
        assert_eq!(regions.temperature, PLACEHOLDER);
        assert_eq!(regions.humidity, PLACEHOLDER);
        assert_eq!(regions.wind, PLACEHOLDER);
        assert_eq!(regions.footer, "Source: open-meteo");
    }

    #[test]
    fn error_payload_without_location_or_source_uses_defaults() {
        let regions = rendered(json!({"error": "boom"}));
        assert_eq!(regions.location, "Error");
        assert_eq!(regions.footer, "Source: weather API");
    }

    #[test]
    fn missing_text_fields_render_as_unknown() {
        let regions = rendered(json!({}));
        assert_eq!(regions.location, "Unknown");
        assert_eq!(regions.condition, "Unknown");
        assert_eq!(regions.icon, Icon::PartlyCloudy.symbol());
    }

    #[test]
    fn temperature_both_units() {
        let regions = rendered(json!({"temperatureF": 68, "temperatureC": 20}));
        assert_eq!(regions.temperature, "68°F / 20°C");
    }

    #[test]
    fn temperature_fahrenheit_only() {
        let regions = rendered(json!({"temperatureF": 68}));
        assert_eq!(regions.temperature, "68°F");
    }

    #[test]
    fn temperature_zero_celsius_alone_still_renders() {
        let regions = rendered(json!({"temperatureC": 0}));
        assert_eq!(regions.temperature, "0°C");
    }

    #[test]
    fn temperature_zero_breaks_the_dual_unit_branch() {
        // 0°F is "absent" for the dual-unit check but present for the
        // single-unit one, so only Fahrenheit shows.
        let regions = rendered(json!({"temperatureF": 0, "temperatureC": -18}));
        assert_eq!(regions.temperature, "0°F");
    }

    #[test]
    fn temperature_absent_renders_dash() {
        let regions = rendered(json!({}));
        assert_eq!(regions.temperature, PLACEHOLDER);
    }

    #[test]
    fn zero_humidity_is_not_absence() {
        let regions = rendered(json!({"humidityPercent": 0}));
        assert_eq!(regions.humidity, "0%");
    }

    #[test]
    fn wind_text_wins_over_speed() {
        let regions = rendered(json!({"wind": "Calm", "windKph": 12}));
        assert_eq!(regions.wind, "Calm");
    }

    #[test]
    fn wind_speed_fallback_formats_kph() {
        let regions = rendered(json!({"windKph": 12}));
        assert_eq!(regions.wind, "12 km/h");
    }

    #[test]
    fn zero_wind_speed_renders_dash() {
        let regions = rendered(json!({"windKph": 0}));
        assert_eq!(regions.wind, PLACEHOLDER);
    }

    #[test]
    fn footer_with_timestamp_and_source() {
        let regions = rendered(json!({"reportedAtUtc": "2024-01-01T00:00Z", "source": "NOAA"}));
        assert_eq!(regions.footer, "Reported 2024-01-01T00:00Z · NOAA");
    }

    #[test]
    fn footer_with_timestamp_but_no_source() {
        let regions = rendered(json!({"reportedAtUtc": "2024-01-01T00:00Z"}));
        assert_eq!(regions.footer, "Reported 2024-01-01T00:00Z · weather");
    }

    #[test]
    fn footer_without_timestamp() {
        let regions = rendered(json!({"source": "NOAA"}));
        assert_eq!(regions.footer, "Source: NOAA");

        let regions = rendered(json!({}));
        assert_eq!(regions.footer, "Source: weather API");
    }

    #[test]
    fn fractional_values_keep_their_fraction() {
        let regions = rendered(json!({"temperatureC": 20.5, "humidityPercent": 87.5}));
        assert_eq!(regions.temperature, "20.5°C");
        assert_eq!(regions.humidity, "87.5%");
    }

    #[test]
    fn theme_survives_a_render() {
        let mut state = DisplayState::default();
        state.set_theme(Some("light"));
        state.apply(rendered(json!({"condition": "Clear sky"})));

        assert_eq!(state.theme, "light");
        assert_eq!(state.regions.condition, "Clear sky");
    }

    #[test]
    fn missing_theme_defaults_to_dark() {
        let mut state = DisplayState::default();
        state.set_theme(Some("light"));
        state.set_theme(None);
        assert_eq!(state.theme, "dark");
    }
}
