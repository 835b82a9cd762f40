//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - Forecast and geocoding provider clients
//! - Location resolution (device position, place search)
//! - Weather retrieval and normalization into [`WeatherData`]
//! - View state (data, loading, error, preferences) and the theme flag
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod location;
pub mod model;
pub mod preferences;
pub mod provider;
pub mod theme;
pub mod view_state;

pub use condition::Condition;
pub use config::{Config, LocationSource};
pub use error::WeatherError;
pub use fetcher::WeatherFetcher;
pub use location::{DeviceLocator, LocationResolver};
pub use model::{Coordinates, PlaceCandidate, WeatherData};
pub use preferences::{PreferencesUpdate, UserPreferences, Units};
pub use provider::{ForecastProvider, GeocodingProvider};
pub use theme::{Theme, ThemeState};
pub use view_state::{ViewSnapshot, ViewState};
