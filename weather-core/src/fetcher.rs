//! Forecast retrieval and normalization into [`WeatherData`].

use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::{
    condition::Condition,
    error::{Result, WeatherError},
    model::{
        Coordinates, CurrentConditions, DAILY_SAMPLES, DailyForecast, FALLBACK_LOCATION_NAME,
        Forecast, HOURLY_SAMPLES, HourlyForecast, LocationInfo, WeatherData,
    },
    provider::{
        Address, DailySeries, ForecastProvider, ForecastResponse, GeocodingProvider, HourlySeries,
    },
};

#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    forecast: Arc<dyn ForecastProvider>,
    geocoder: Arc<dyn GeocodingProvider>,
}

impl WeatherFetcher {
    pub fn new(forecast: Arc<dyn ForecastProvider>, geocoder: Arc<dyn GeocodingProvider>) -> Self {
        Self { forecast, geocoder }
    }

    /// Fetch and assemble weather for the given position.
    ///
    /// Both coordinates are checked before any request is sent. The forecast
    /// request is fatal on failure; the reverse-geocoding request that
    /// follows it is not, and only degrades the location name.
    pub async fn fetch(&self, lat: Option<f64>, lon: Option<f64>) -> Result<WeatherData> {
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(WeatherError::MissingCoordinates);
        };
        let coords = Coordinates::new(lat, lon);

        let forecast = self.forecast.forecast(coords).await?;

        let address = match self.geocoder.reverse(coords).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!("Failed to fetch location name: {e}");
                Address::default()
            }
        };

        Ok(assemble(forecast, address))
    }
}

/// Build the dashboard payload from the raw provider responses.
pub fn assemble(forecast: ForecastResponse, address: Address) -> WeatherData {
    let condition = Condition::from_code(forecast.current.weather_code);

    WeatherData {
        location: location_info(address, forecast.latitude, forecast.longitude),
        current: CurrentConditions {
            temp: forecast.current.temperature_2m,
            feels_like: forecast.current.temperature_2m,
            condition,
            icon: condition,
            humidity: forecast.current.relative_humidity_2m,
            wind_speed: forecast.current.wind_speed_10m,
            wind_direction: None,
            pressure: None,
            uv_index: None,
            visibility: None,
            cloud_cover: None,
        },
        forecast: Forecast {
            hourly: hourly_entries(&forecast.hourly),
            daily: daily_entries(&forecast.daily),
        },
        air_quality: None,
        alerts: Vec::new(),
    }
}

fn location_info(address: Address, lat: f64, lon: f64) -> LocationInfo {
    let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

    let name = non_empty(&address.city)
        .or_else(|| non_empty(&address.town))
        .or_else(|| non_empty(&address.village))
        .unwrap_or_else(|| FALLBACK_LOCATION_NAME.to_string());

    LocationInfo {
        name,
        country: address.country.unwrap_or_default(),
        region: address.state.unwrap_or_default(),
        lat,
        lon,
    }
}

fn hourly_entries(series: &HourlySeries) -> Vec<HourlyForecast> {
    series
        .time
        .iter()
        .zip(&series.temperature_2m)
        .zip(&series.weather_code)
        .zip(&series.wind_speed_10m)
        .take(HOURLY_SAMPLES)
        .map(|(((time, &temp), &code), &wind_speed)| {
            let condition = Condition::from_code(code);
            HourlyForecast {
                time: hour_label(time),
                temp,
                condition,
                icon: condition,
                precipitation: None,
                wind_speed,
            }
        })
        .collect()
}

fn daily_entries(series: &DailySeries) -> Vec<DailyForecast> {
    series
        .time
        .iter()
        .zip(&series.temperature_2m_max)
        .zip(&series.temperature_2m_min)
        .zip(&series.weather_code)
        .zip(&series.wind_speed_10m_max)
        .take(DAILY_SAMPLES)
        .enumerate()
        .map(|(i, ((((date, &high), &low), &code), &wind_speed))| {
            let condition = Condition::from_code(code);
            DailyForecast {
                date: date.clone(),
                temp_high: high,
                temp_low: low,
                condition,
                icon: condition,
                precipitation: None,
                humidity: series.relative_humidity_2m_max.get(i).copied().flatten(),
                wind_speed,
            }
        })
        .collect()
}

/// Two-digit 12-hour label for a provider timestamp (`2025-06-01T13:00` → `01 PM`).
/// Timestamps that don't parse are passed through.
fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .map(|dt| dt.format("%I %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}
