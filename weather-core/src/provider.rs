use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::{
    error::{Result, WeatherError},
    model::{Coordinates, PlaceCandidate},
};

pub mod nominatim;
pub mod open_meteo;

pub use nominatim::NominatimClient;
pub use open_meteo::OpenMeteoClient;

/// Source of current/hourly/daily forecast data.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse>;
}

/// Forward and reverse geocoding.
#[async_trait]
pub trait GeocodingProvider: Send + Sync + Debug {
    /// Resolve coordinates to an address. Non-success statuses are errors;
    /// callers decide whether that is fatal.
    async fn reverse(&self, coords: Coordinates) -> Result<Address>;

    /// Up to five candidates in the provider's relevance order.
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>>;
}

/// Forecast payload as returned by the provider, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentSample,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentSample {
    pub temperature_2m: f64,
    pub weather_code: i64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
}

/// Parallel arrays indexed by sample.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weather_code: Vec<i64>,
    pub wind_speed_10m: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weather_code: Vec<i64>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub wind_speed_10m_max: Vec<f64>,
    #[serde(default)]
    pub relative_humidity_2m_max: Vec<Option<f64>>,
}

/// Subset of a reverse-geocoding address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Shared HTTP client for all providers. No request timeout is applied.
pub fn http_client(user_agent: &str) -> Result<Client> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Read a successful response body as JSON, mapping parse failures to
/// [`WeatherError::Parse`].
pub(crate) async fn read_json<T: DeserializeOwned>(res: Response, what: &str) -> Result<T> {
    let body = res.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::debug!("Unparseable {what} body: {}", truncate_body(&body));
        WeatherError::Parse(format!("{what}: {e}"))
    })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("{}"), "{}");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }

    #[test]
    fn daily_series_tolerates_missing_humidity() {
        let json = serde_json::json!({
            "time": ["2025-06-01"],
            "weather_code": [3],
            "temperature_2m_max": [20.0],
            "temperature_2m_min": [11.0],
            "wind_speed_10m_max": [14.2]
        });
        let daily: DailySeries = serde_json::from_value(json).unwrap();

        assert!(daily.relative_humidity_2m_max.is_empty());
    }
}
