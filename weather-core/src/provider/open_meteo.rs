use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{Result, WeatherError},
    model::Coordinates,
};

use super::{ForecastProvider, ForecastResponse, read_json};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,relative_humidity_2m,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = concat!(
    "weather_code,temperature_2m_max,temperature_2m_min,",
    "wind_speed_10m_max,relative_humidity_2m_max",
);

/// Open-Meteo forecast API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse> {
        let url = format!("{}/forecast", self.base_url);
        tracing::debug!(lat = coords.lat, lon = coords.lon, "Requesting forecast from {url}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.lat.to_string().as_str()),
                ("longitude", coords.lon.to_string().as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!("Forecast request failed with status {status}");
            return Err(WeatherError::ForecastFetchFailed {
                status: status.as_u16(),
            });
        }

        read_json(res, "forecast").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.41,
            "current": {
                "temperature_2m": 18.3,
                "weather_code": 2,
                "relative_humidity_2m": 61,
                "wind_speed_10m": 9.7
            },
            "hourly": {
                "time": ["2025-06-01T00:00"],
                "temperature_2m": [14.0],
                "weather_code": [0],
                "wind_speed_10m": [4.0]
            },
            "daily": {
                "time": ["2025-06-01"],
                "weather_code": [61],
                "temperature_2m_max": [21.0],
                "temperature_2m_min": [12.5],
                "wind_speed_10m_max": [18.0],
                "relative_humidity_2m_max": [88]
            }
        })
    }

    #[tokio::test]
    async fn sends_documented_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "52.52"))
            .and(query_param("longitude", "13.41"))
            .and(query_param("current", CURRENT_FIELDS))
            .and(query_param("hourly", HOURLY_FIELDS))
            .and(query_param("daily", DAILY_FIELDS))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new(server.uri(), Client::new());
        let forecast = client.forecast(Coordinates::new(52.52, 13.41)).await.unwrap();

        assert_eq!(forecast.current.weather_code, 2);
        assert_eq!(forecast.daily.relative_humidity_2m_max, vec![Some(88.0)]);
    }

    #[tokio::test]
    async fn non_success_status_is_forecast_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new(server.uri(), Client::new());
        let err = client.forecast(Coordinates::new(1.0, 2.0)).await.unwrap_err();

        assert!(matches!(err, WeatherError::ForecastFetchFailed { status: 503 }));
    }

    #[tokio::test]
    async fn garbage_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new(format!("{}/", server.uri()), Client::new());
        let err = client.forecast(Coordinates::new(1.0, 2.0)).await.unwrap_err();

        assert!(matches!(err, WeatherError::Parse(_)));
    }
}
