//! Dashboard view state: the single owner of weather data, loading and error.
//!
//! Every request that can change the data takes a generation number when it
//! starts. A result is applied only while its generation is still the latest,
//! so a slow response can never overwrite a newer one, and only the latest
//! request clears `loading`.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use tokio::sync::watch;

use crate::{
    config::Config,
    fetcher::WeatherFetcher,
    location::{LocationResolver, locator_from_config},
    model::{PlaceCandidate, WeatherData},
    preferences::{PreferencesUpdate, UserPreferences},
    provider::{NominatimClient, OpenMeteoClient, http_client},
};

/// Shown when the device position can't be determined.
pub const LOCATION_ERROR_MESSAGE: &str =
    "Unable to get your location. Please search for a city manually.";

const FETCH_ABORTED_MESSAGE: &str = "Failed to fetch weather data";

/// What the presentation layer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub weather: Option<WeatherData>,
    pub loading: bool,
    pub error: Option<String>,
    pub preferences: UserPreferences,
}

impl ViewSnapshot {
    /// Nothing to show yet and the last request failed.
    pub fn is_failed(&self) -> bool {
        !self.loading && self.weather.is_none() && self.error.is_some()
    }
}

#[derive(Debug)]
pub struct ViewState {
    fetcher: WeatherFetcher,
    resolver: LocationResolver,
    state: watch::Sender<ViewSnapshot>,
    generation: AtomicU64,
    activated: AtomicBool,
}

impl ViewState {
    pub fn new(
        fetcher: WeatherFetcher,
        resolver: LocationResolver,
        preferences: UserPreferences,
    ) -> Self {
        let (state, _) = watch::channel(ViewSnapshot {
            weather: None,
            loading: true,
            error: None,
            preferences,
        });

        Self {
            fetcher,
            resolver,
            state,
            generation: AtomicU64::new(0),
            activated: AtomicBool::new(false),
        }
    }

    /// Wire the Open-Meteo and Nominatim clients and the configured device
    /// locator. Preferences start from the configured units.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = http_client(&config.user_agent)?;
        let endpoints = &config.endpoints;
        let forecast = Arc::new(OpenMeteoClient::new(&endpoints.forecast_url, http.clone()));
        let geocoder = Arc::new(NominatimClient::new(&endpoints.geocoding_url, http.clone()));
        let locator = locator_from_config(config, http)?;

        Ok(Self::new(
            WeatherFetcher::new(forecast, geocoder.clone()),
            LocationResolver::new(locator, geocoder),
            UserPreferences::with_units(config.units),
        ))
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }

    /// Receive a new snapshot whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.state.subscribe()
    }

    /// Startup hook. The first call resolves the current location and
    /// fetches its weather; later calls do nothing and return `false`.
    pub async fn activate(&self) -> bool {
        if self.activated.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::info!("View state activated");
        self.current_location().await;
        true
    }

    /// Fetch weather for the given coordinates and publish the result.
    ///
    /// On failure `error` is set and any previously fetched data is kept.
    pub async fn fetch_weather(&self, lat: Option<f64>, lon: Option<f64>) {
        let request = self.begin();

        match self.fetcher.fetch(lat, lon).await {
            Ok(data) => {
                tracing::info!(location = %data.location.name, "Weather updated");
                request.finish(|s| {
                    s.weather = Some(data);
                    s.error = None;
                });
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {e}");
                let message = e.to_string();
                request.finish(|s| s.error = Some(message));
            }
        }
    }

    /// Place search that never fails: errors are recorded in `error` and
    /// reported as no results. Blank queries return immediately.
    pub async fn search_location(&self, query: &str) -> Vec<PlaceCandidate> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.resolver.search_places(query).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!("Place search failed: {e}");
                let message = e.to_string();
                self.state.send_modify(|s| s.error = Some(message));
                Vec::new()
            }
        }
    }

    /// Resolve the device position and fetch weather for it.
    pub async fn current_location(&self) {
        let request = self.begin();

        match self.resolver.device_location().await {
            Ok(coords) if request.is_current() => {
                // fetch_weather supersedes this request with its own generation
                request.cancel();
                self.fetch_weather(Some(coords.lat), Some(coords.lon)).await;
            }
            Ok(_) => {
                tracing::debug!(
                    generation = request.generation,
                    "Discarding superseded device location"
                );
                request.cancel();
            }
            Err(e) => {
                tracing::warn!("Device location failed: {e}");
                request.finish(|s| s.error = Some(LOCATION_ERROR_MESSAGE.to_string()));
            }
        }
    }

    /// Shallow-merge into the current preferences.
    pub fn update_preferences(&self, update: PreferencesUpdate) {
        self.state.send_modify(|s| s.preferences.apply(update));
    }

    fn begin(&self) -> PendingRequest<'_> {
        let mut generation = 0;
        self.state.send_modify(|s| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            s.loading = true;
            s.error = None;
        });
        PendingRequest {
            view: self,
            generation,
            settled: false,
        }
    }

    /// Apply `update` and clear `loading` if `generation` is still current.
    fn settle(&self, generation: u64, update: impl FnOnce(&mut ViewSnapshot)) -> bool {
        let applied = self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(s);
            s.loading = false;
            true
        });
        if !applied {
            tracing::debug!(generation, "Discarding superseded result");
        }
        applied
    }
}

/// An in-flight request. Dropping it unsettled (cancelled future, panic)
/// still clears `loading` and records an error.
struct PendingRequest<'a> {
    view: &'a ViewState,
    generation: u64,
    settled: bool,
}

impl PendingRequest<'_> {
    fn finish(mut self, update: impl FnOnce(&mut ViewSnapshot)) {
        self.settled = true;
        self.view.settle(self.generation, update);
    }

    fn is_current(&self) -> bool {
        self.view.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Settle without touching state; a follow-up request takes over.
    fn cancel(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.view.settle(self.generation, |s| {
                s.error.get_or_insert_with(|| FETCH_ABORTED_MESSAGE.to_string());
            });
        }
    }
}
