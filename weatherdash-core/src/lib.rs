//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - The saved-location store and its change notifications
//! - Key-value storage backends (file and in-memory)
//! - Configuration handling
//! - The OpenWeather client for current weather, forecasts and location snapshots
//! - Clothing suggestions and weather alerts
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod advice;
pub mod config;
pub mod model;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::{Config, Units};
pub use model::{CurrentWeather, ForecastDay, LocationKey, SavedLocation};
pub use provider::WeatherProvider;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{SavedLocationStore, StoreError, Subscription};
