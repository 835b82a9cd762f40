use thiserror::Error;

/// Failures surfaced by location resolution and weather retrieval.
///
/// `Display` of each variant is the message the view state stores in its
/// `error` field, so keep them readable.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Latitude and longitude are required to fetch weather data.")]
    MissingCoordinates,

    #[error("Failed to fetch weather data from API (status {status}).")]
    ForecastFetchFailed { status: u16 },

    #[error("Geolocation is not supported")]
    LocationUnavailable,

    /// Host-level location failure, passed through without classification.
    #[error("{0}")]
    Location(String),

    #[error("Failed to fetch location name (status {status}).")]
    ReverseGeocodeFailed { status: u16 },

    #[error("Failed to search locations (status {status}).")]
    SearchFailed { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse provider response: {0}")]
    Parse(String),
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
