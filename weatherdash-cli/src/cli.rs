use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weatherdash_core::{
    Config, FileStorage, LocationKey, SavedLocationStore, Units,
    provider::{WeatherProvider, provider_from_config},
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard with saved locations")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides this).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the OpenWeather API key and preferred units.
    Configure,

    /// Show current weather and clothing advice for a place.
    Show {
        /// City, state, or country, e.g. "Paris" or "Paris,FR".
        query: String,
    },

    /// Show the 5-day forecast for a place.
    Forecast {
        /// City, state, or country, e.g. "Paris" or "Paris,FR".
        query: String,
    },

    /// Look up a place and add it to the saved locations.
    Save {
        /// City, state, or country, e.g. "Paris" or "Paris,FR".
        query: String,
    },

    /// List saved locations, most recent first.
    Saved,

    /// Show current weather for a saved location.
    View {
        /// Place name exactly as saved.
        name: String,
        /// Country exactly as saved.
        country: String,
    },

    /// Remove a saved location.
    Remove {
        /// Place name exactly as saved.
        name: String,
        /// Country exactly as saved.
        country: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { query } => {
                let provider = provider_from_config(&config)?;
                show(provider.as_ref(), &query, config.units).await?;
            }
            Command::Forecast { query } => {
                let provider = provider_from_config(&config)?;
                let days = provider.forecast(&query).await?;
                render::forecast(&query, &days, config.units);
            }
            Command::Save { query } => {
                let provider = provider_from_config(&config)?;
                let weather = provider.current_weather(&query).await?;

                let store = open_store(&config)?;
                let _sub = print_on_change(&store);
                store
                    .save(weather.to_saved_location())
                    .with_context(|| format!("Could not save {}, {}", weather.name, weather.country))?;
                println!("Saved {}, {}.", weather.name, weather.country);
            }
            Command::Saved => {
                let store = open_store(&config)?;
                render::saved_locations(&store.list());
            }
            Command::View { name, country } => {
                let store = open_store(&config)?;
                let key = LocationKey::new(name, country);
                let saved = store.get(&key).ok_or_else(|| {
                    anyhow!("'{key}' is not a saved location.\nHint: run `weatherdash saved`.")
                })?;

                let provider = provider_from_config(&config)?;
                show(provider.as_ref(), &saved.key().as_query(), config.units).await?;
            }
            Command::Remove { name, country } => {
                let store = open_store(&config)?;
                let key = LocationKey::new(name, country);
                if store.get(&key).is_none() {
                    println!("'{key}' was not saved; nothing to remove.");
                    return Ok(());
                }

                let _sub = print_on_change(&store);
                store.remove(&key).with_context(|| format!("Could not remove {key}"))?;
                println!("Removed {key}.");
            }
        }

        Ok(())
    }
}

fn open_store(config: &Config) -> anyhow::Result<Arc<SavedLocationStore<FileStorage>>> {
    let storage = config.storage()?;
    tracing::debug!(dir = %storage.dir().display(), "opening saved locations");

    Ok(Arc::new(SavedLocationStore::new(storage).with_max_entries(config.max_saved_locations)))
}

/// Reprint the saved list whenever the store reports a change.
fn print_on_change(
    store: &Arc<SavedLocationStore<FileStorage>>,
) -> weatherdash_core::Subscription {
    let weak = Arc::downgrade(store);
    store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            render::saved_locations(&store.list());
        }
    })
}

async fn show(provider: &dyn WeatherProvider, query: &str, units: Units) -> anyhow::Result<()> {
    let weather = provider.current_weather(query).await?;
    render::current_weather(&weather, units);
    Ok(())
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    let units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    config.set_api_key(api_key);
    config.units = units;
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
