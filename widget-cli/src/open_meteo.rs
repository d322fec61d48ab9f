//! Open-Meteo backing service: geocodes a location and fetches the current
//! observation, producing the capitalized wire shape the widget consumes.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One weather report on the wire. Serializes with capitalized keys; the
/// widget's resolver tolerates this casing alongside the camel-cased one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherReport {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_f: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_kph: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_at_utc: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WeatherReport {
    /// Failure report: the widget renders these through its error branch.
    fn error(location: String, message: &str) -> Self {
        Self {
            location,
            condition: None,
            temperature_c: None,
            temperature_f: None,
            humidity_percent: None,
            wind_kph: None,
            wind: None,
            reported_at_utc: None,
            source: "open-meteo".to_string(),
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoService {
    http: Client,
}

impl Default for OpenMeteoService {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoService {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Current weather for a free-text location. Never fails outward: fetch
    /// problems become error reports so the widget always has something to
    /// render.
    pub async fn current_weather(&self, location: &str) -> WeatherReport {
        let normalized = normalize_location(location);

        let place = match self.geocode(&normalized).await {
            Ok(Some(place)) => place,
            Ok(None) => {
                return WeatherReport::error(
                    normalized,
                    "Could not find this location. Try a city, address, or zip code.",
                );
            }
            Err(err) => {
                log::error!("geocoding {normalized:?} failed: {err:#}");
                return WeatherReport::error(
                    normalized,
                    "Could not find this location. Try a city, address, or zip code.",
                );
            }
        };

        match self.latest_observation(place.latitude, place.longitude).await {
            Ok(observation) => build_report(&observation, place.canonical_name),
            Err(err) => {
                log::error!("observation fetch for {:?} failed: {err:#}", place.canonical_name);
                WeatherReport::error(
                    place.canonical_name,
                    "Could not retrieve current observations.",
                )
            }
        }
    }

    async fn geocode(&self, location: &str) -> Result<Option<Place>> {
        let url = "https://geocoding-api.open-meteo.com/v1/search";

        let res = self
            .http
            .get(url)
            .query(&[("name", location), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await
            .context("Failed to send request to Open-Meteo geocoding")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeoResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        let Some(hit) = parsed.results.into_iter().next() else {
            return Ok(None);
        };

        let canonical_name = canonical_name(&hit).unwrap_or_else(|| location.to_string());

        Ok(Some(Place { latitude: hit.latitude, longitude: hit.longitude, canonical_name }))
    }

    async fn latest_observation(&self, latitude: f64, longitude: f64) -> Result<Observation> {
        let url = "https://api.open-meteo.com/v1/forecast";

        let res = self
            .http
            .get(url)
            .query(&[
                ("latitude", latitude.to_string().as_str()),
                ("longitude", longitude.to_string().as_str()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,wind_speed_10m,\
                     wind_direction_10m,weather_code",
                ),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo forecast")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        parsed
            .current
            .ok_or_else(|| anyhow!("Open-Meteo response contained no current observation"))
    }
}

#[derive(Debug)]
struct Place {
    latitude: f64,
    longitude: f64,
    canonical_name: String,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoHit>,
}

#[derive(Debug, Deserialize)]
struct GeoHit {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    admin1: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Observation {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
    weather_code: Option<i64>,
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<Observation>,
}

/// Blank input falls back to the demo default.
fn normalize_location(location: &str) -> String {
    let trimmed = location.trim();
    if trimmed.is_empty() { "Seattle, WA".to_string() } else { trimmed.to_string() }
}

fn canonical_name(hit: &GeoHit) -> Option<String> {
    let parts: Vec<&str> = [hit.name.as_deref(), hit.admin1.as_deref(), hit.country.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

fn build_report(observation: &Observation, location: String) -> WeatherReport {
    let temperature_c = observation.temperature_2m;
    let humidity_percent = observation.relative_humidity_2m.map(|h| h.round() as i64);
    let wind_kph = observation.wind_speed_10m.map(|w| w.round() as i64);

    let condition = observation
        .weather_code
        .map_or_else(|| "Unknown".to_string(), |code| map_weather_code(code).to_string());

    let wind_dir = observation
        .wind_direction_10m
        .map_or_else(String::new, |deg| format!(" {}", deg_to_cardinal(deg)));

    let wind = match wind_kph {
        Some(kph) => format!("{kph} km/h{wind_dir}"),
        None => "—".to_string(),
    };

    WeatherReport {
        location,
        condition: Some(condition),
        temperature_c: temperature_c.map(|c| c.round() as i64),
        // Fahrenheit is derived from the unrounded Celsius reading.
        temperature_f: temperature_c.map(|c| (c * 1.8 + 32.0).round() as i64),
        humidity_percent,
        wind_kph,
        wind: Some(wind),
        reported_at_utc: Some(format_reported_at(observation.time.as_deref())),
        source: "open-meteo".to_string(),
        error: None,
    }
}

/// WMO weather interpretation codes, as published by Open-Meteo.
fn map_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snowfall",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

fn deg_to_cardinal(deg: f64) -> &'static str {
    const DIRS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    let index = (deg.rem_euclid(360.0) / 22.5).round() as usize % 16;
    DIRS[index]
}

/// Open-Meteo reports observation time as ISO 8601, sometimes without an
/// offset. Unparseable input falls back to the current time.
fn format_reported_at(time: Option<&str>) -> String {
    let utc = time.and_then(parse_observation_time).unwrap_or_else(Utc::now);
    format!("{}Z", utc.format("%Y-%m-%d %H:%M:%S"))
}

fn parse_observation_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
