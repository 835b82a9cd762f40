//! Device location and place search.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, sync::Arc};

use crate::{
    config::{Config, LocationSource},
    error::{Result, WeatherError},
    model::{Coordinates, PlaceCandidate},
    provider::GeocodingProvider,
};

/// The host's one-shot location capability.
#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates>;
}

/// Host without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

#[async_trait]
impl DeviceLocator for NoLocator {
    async fn locate(&self) -> Result<Coordinates> {
        Err(WeatherError::LocationUnavailable)
    }
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl DeviceLocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl DeviceLocator for IpLocator {
    async fn locate(&self) -> Result<Coordinates> {
        tracing::debug!("Requesting IP location from {}", self.url);

        // Any failure here is reported opaquely, like a host geolocation error.
        let lookup: IpLookup = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| WeatherError::Location(e.to_string()))?
            .json()
            .await
            .map_err(|e| WeatherError::Location(e.to_string()))?;

        match (lookup.status.as_str(), lookup.lat, lookup.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(WeatherError::Location(
                lookup.message.unwrap_or_else(|| "IP location lookup failed".to_string()),
            )),
        }
    }
}

/// Build the device locator selected in `config`.
pub fn locator_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Arc<dyn DeviceLocator>> {
    let locator: Arc<dyn DeviceLocator> = match config.location.source {
        LocationSource::Ip => {
            Arc::new(IpLocator::new(config.endpoints.ip_location_url.clone(), http))
        }
        LocationSource::Fixed => Arc::new(FixedLocator(config.fixed_coordinates()?)),
        LocationSource::None => Arc::new(NoLocator),
    };
    Ok(locator)
}

/// Resolves where to fetch weather for: the device position or a searched place.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    locator: Arc<dyn DeviceLocator>,
    geocoder: Arc<dyn GeocodingProvider>,
}

impl LocationResolver {
    pub fn new(locator: Arc<dyn DeviceLocator>, geocoder: Arc<dyn GeocodingProvider>) -> Self {
        Self { locator, geocoder }
    }

    pub async fn device_location(&self) -> Result<Coordinates> {
        let coords = self.locator.locate().await?;
        tracing::debug!(lat = coords.lat, lon = coords.lon, "Device location resolved");
        Ok(coords)
    }

    /// Candidates in provider order, at most five. Does not filter empty
    /// queries; that is the caller's job.
    pub async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let places = self.geocoder.search(query).await?;
        tracing::debug!("Search for {query:?} returned {} candidates", places.len());
        Ok(places)
    }
}
