use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Result, WeatherError},
    model::{Coordinates, PlaceCandidate},
};

use super::{Address, GeocodingProvider, read_json};

/// Maximum number of search candidates requested.
pub const SEARCH_LIMIT: usize = 5;

/// Nominatim (OpenStreetMap) geocoding client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    http: Client,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    display_name: String,
    lat: String,
    lon: String,
}

impl TryFrom<SearchHit> for PlaceCandidate {
    type Error = WeatherError;

    fn try_from(hit: SearchHit) -> Result<Self> {
        let lat = hit
            .lat
            .trim()
            .parse::<f64>()
            .map_err(|e| WeatherError::Parse(format!("latitude '{}': {e}", hit.lat)))?;
        let lon = hit
            .lon
            .trim()
            .parse::<f64>()
            .map_err(|e| WeatherError::Parse(format!("longitude '{}': {e}", hit.lon)))?;

        Ok(PlaceCandidate {
            name: hit.display_name,
            lat,
            lon,
        })
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn reverse(&self, coords: Coordinates) -> Result<Address> {
        let url = format!("{}/reverse", self.base_url);
        tracing::debug!(lat = coords.lat, lon = coords.lon, "Reverse geocoding via {url}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.lat.to_string().as_str()),
                ("lon", coords.lon.to_string().as_str()),
                ("format", "jsonv2"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::ReverseGeocodeFailed {
                status: status.as_u16(),
            });
        }

        let body: ReverseResponse = read_json(res, "reverse geocoding").await?;
        Ok(body.address)
    }

    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!("Searching places for {query:?} via {url}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", SEARCH_LIMIT.to_string().as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::SearchFailed {
                status: status.as_u16(),
            });
        }

        let hits: Vec<SearchHit> = read_json(res, "place search").await?;
        hits.into_iter()
            .take(SEARCH_LIMIT)
            .map(PlaceCandidate::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reverse_extracts_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("format", "jsonv2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "Utrecht, Netherlands",
                "address": { "city": "Utrecht", "state": "Utrecht", "country": "Nederland" }
            })))
            .mount(&server)
            .await;

        let client = NominatimClient::new(server.uri(), Client::new());
        let address = client.reverse(Coordinates::new(52.09, 5.12)).await.unwrap();

        assert_eq!(address.city.as_deref(), Some("Utrecht"));
        assert_eq!(address.country.as_deref(), Some("Nederland"));
        assert_eq!(address.town, None);
    }

    #[tokio::test]
    async fn reverse_without_address_block_is_empty_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "Unable to geocode" })),
            )
            .mount(&server)
            .await;

        let client = NominatimClient::new(server.uri(), Client::new());
        let address = client.reverse(Coordinates::new(0.0, -160.0)).await.unwrap();

        assert_eq!(address, Address::default());
    }

    #[tokio::test]
    async fn search_parses_string_coordinates_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "springfield"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "display_name": "Springfield, Illinois", "lat": "39.7990", "lon": "-89.6440" },
                { "display_name": "Springfield, Missouri", "lat": "37.2090", "lon": "-93.2923" }
            ])))
            .mount(&server)
            .await;

        let client = NominatimClient::new(server.uri(), Client::new());
        let hits = client.search("springfield").await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Springfield, Illinois");
        assert_eq!(hits[1].lat, 37.2090);
        assert_eq!(hits[1].lon, -93.2923);
    }

    #[tokio::test]
    async fn search_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = NominatimClient::new(server.uri(), Client::new());
        let err = client.search("x").await.unwrap_err();

        assert!(matches!(err, WeatherError::SearchFailed { status: 429 }));
    }

    #[test]
    fn unparseable_coordinate_is_parse_error() {
        let hit = SearchHit {
            display_name: "Nowhere".into(),
            lat: "north".into(),
            lon: "0".into(),
        };

        let err = PlaceCandidate::try_from(hit).unwrap_err();
        assert!(err.to_string().contains("latitude 'north'"));
    }
}
