use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a saved location: the `(name, country)` pair exactly as the
/// provider spelled it. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey {
    pub name: String,
    pub country: String,
}

impl LocationKey {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self { name: name.into(), country: country.into() }
    }

    /// Query string understood by the weather provider, e.g. `Paris,FR`.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.name, self.country)
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// A location the user chose to keep, with a frozen sunrise/sunset snapshot.
///
/// Serialized field names match the persisted slot layout:
/// `{name, country, lat, lon, lastUpdated, sunrise, sunset}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub last_updated: DateTime<Utc>,
    /// Seconds since epoch.
    pub sunrise: i64,
    /// Seconds since epoch.
    pub sunset: i64,
}

impl SavedLocation {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        lat: f64,
        lon: f64,
        sunrise: i64,
        sunset: i64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            lat,
            lon,
            last_updated: Utc::now(),
            sunrise,
            sunset,
        }
    }

    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.name.clone(), self.country.clone())
    }

    pub fn has_key(&self, key: &LocationKey) -> bool {
        self.name == key.name && self.country == key.country
    }
}

/// Current conditions for one place, as reported by a weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    /// Short condition group, e.g. "Rain" or "Clear".
    pub condition: String,
    pub description: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentWeather {
    /// Snapshot handed to the saved-location store when the user saves this result.
    pub fn to_saved_location(&self) -> SavedLocation {
        SavedLocation::new(
            self.name.clone(),
            self.country.clone(),
            self.lat,
            self.lon,
            self.sunrise,
            self.sunset,
        )
    }
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Short condition group, e.g. "Clouds".
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}
