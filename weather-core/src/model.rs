use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// Number of hourly samples kept from the provider series.
pub const HOURLY_SAMPLES: usize = 6;
/// Number of daily samples kept from the provider series.
pub const DAILY_SAMPLES: usize = 7;
/// Display name used when reverse geocoding yields no settlement name.
pub const FALLBACK_LOCATION_NAME: &str = "Current Location";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One forward-geocoding search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl PlaceCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// The complete dashboard payload. Rebuilt wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub forecast: Forecast,
    /// Not supplied by the forecast provider.
    pub air_quality: Option<AirQuality>,
    pub alerts: Vec<WeatherAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
    pub region: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions. Temperatures in °C, wind in km/h.
///
/// Fields typed as `Option` have no source in the forecast provider and are
/// always `None` today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub condition: Condition,
    pub icon: Condition,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: Option<String>,
    pub pressure: Option<f64>,
    pub uv_index: Option<f64>,
    pub visibility: Option<f64>,
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    /// Localized hour label, e.g. "01 PM".
    pub time: String,
    pub temp: f64,
    pub condition: Condition,
    pub icon: Condition,
    pub precipitation: Option<f64>,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// ISO date as reported by the provider, e.g. "2025-06-01".
    pub date: String,
    pub temp_high: f64,
    pub temp_low: f64,
    pub condition: Condition,
    pub icon: Condition,
    pub precipitation: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: f64,
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Minor,
    Moderate,
    Severe,
    Extreme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub start: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_data_serializes_with_camel_case_keys() {
        let data = WeatherData {
            location: LocationInfo {
                name: "Paris".into(),
                country: "France".into(),
                region: "Île-de-France".into(),
                lat: 48.85,
                lon: 2.35,
            },
            current: CurrentConditions {
                temp: 21.0,
                feels_like: 21.0,
                condition: Condition::Clear,
                icon: Condition::Clear,
                humidity: 40.0,
                wind_speed: 8.0,
                wind_direction: None,
                pressure: None,
                uv_index: None,
                visibility: None,
                cloud_cover: None,
            },
            forecast: Forecast {
                hourly: vec![],
                daily: vec![],
            },
            air_quality: None,
            alerts: vec![],
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["current"]["feelsLike"], 21.0);
        assert_eq!(json["current"]["condition"], "clear");
        assert!(json["current"]["windDirection"].is_null());
        assert!(json["airQuality"].is_null());
        assert_eq!(json["alerts"], serde_json::json!([]));
    }

    #[test]
    fn alert_severity_uses_lowercase_labels() {
        let json = serde_json::to_string(&AlertSeverity::Extreme).unwrap();
        assert_eq!(json, "\"extreme\"");
    }
}
