use crate::{Config, CurrentWeather, ForecastDay, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions. The CLI turns a result into a
/// `SavedLocation` snapshot when the user saves it; the store itself never
/// fetches anything.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up current weather for a free-form query such as `Paris` or `Paris,FR`.
    async fn current_weather(&self, query: &str) -> anyhow::Result<CurrentWeather>;

    /// One entry per day for the next few days, soonest first.
    async fn forecast(&self, query: &str) -> anyhow::Result<Vec<ForecastDay>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(api_key, config.units)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_with_api_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
