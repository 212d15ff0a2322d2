use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::Units,
    model::{CurrentWeather, ForecastDay},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const ENTRIES_PER_DAY: usize = 8;
const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units) -> Self {
        Self { api_key, units, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// GET an OpenWeather endpoint and return the body of a 2xx response.
    async fn fetch(&self, endpoint: &str, what: &str, query: &str) -> Result<String> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if status == StatusCode::NOT_FOUND {
            return Err(anyhow!(
                "City not found: '{query}'.\n\
                 Hint: check the spelling or enter a valid city, state, or country."
            ));
        }

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }

    async fn fetch_current(&self, query: &str) -> Result<CurrentWeather> {
        let body = self.fetch("weather", "current weather", query).await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        tracing::debug!(query, name = %parsed.name, "fetched current weather");

        let observed_at = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);

        let (condition, description) = parsed
            .weather
            .first()
            .map(|w| (w.main.clone(), w.description.clone()))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

        Ok(CurrentWeather {
            name: parsed.name,
            country: parsed.sys.country,
            lat: parsed.coord.lat,
            lon: parsed.coord.lon,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            condition,
            description,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            observed_at,
        })
    }

    /// The 5-day endpoint returns 3-hour steps; every 8th entry is one per day.
    async fn fetch_forecast(&self, query: &str) -> Result<Vec<ForecastDay>> {
        let body = self.fetch("forecast", "5-day forecast", query).await?;

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        if parsed.list.is_empty() {
            return Err(anyhow!("OpenWeather forecast response contained no data"));
        }

        let days = parsed
            .list
            .iter()
            .step_by(ENTRIES_PER_DAY)
            .take(FORECAST_DAYS)
            .map(|entry| ForecastDay {
                date: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
                temp_min: entry.main.temp_min,
                temp_max: entry.main.temp_max,
                condition: entry
                    .weather
                    .first()
                    .map(|w| w.main.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                humidity_pct: entry.main.humidity,
                wind_speed: entry.wind.speed,
            })
            .collect::<Vec<_>>();

        tracing::debug!(query, days = days.len(), "fetched forecast");
        Ok(days)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &str) -> Result<CurrentWeather> {
        let query = query.trim();
        if query.is_empty() {
            return Err(anyhow!("Search query must not be empty"));
        }

        self.fetch_current(query).await
    }

    async fn forecast(&self, query: &str) -> Result<Vec<ForecastDay>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(anyhow!("Search query must not be empty"));
        }

        self.fetch_forecast(query).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
