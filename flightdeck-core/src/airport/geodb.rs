use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use super::{AirportResolution, AirportResolver};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RAPIDAPI_HOST: &str = "wft-geo-db.p.rapidapi.com";

/// Search radius around the geocoded city, in kilometers.
const AIRPORT_SEARCH_RADIUS_KM: u32 = 100;

/// Airport resolver backed by the GeoDB Cities API on RapidAPI.
#[derive(Debug, Clone)]
pub struct GeoDbResolver {
    api_key: String,
    http: Client,
}

impl GeoDbResolver {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn resolve(&self, city: &str) -> AirportResolution {
        let (latitude, longitude) = match self.geocode_city(city).await {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                error!(city, "no geocoding match for city");
                return AirportResolution::GeocodeFailed;
            }
            Err(err) => {
                error!(city, %err, "city geocoding request failed");
                return AirportResolution::GeocodeFailed;
            }
        };

        debug!(city, latitude, longitude, "geocoded city");

        match self.nearest_airport(latitude, longitude).await {
            Ok(Some(name)) => AirportResolution::Resolved(name),
            Ok(None) => {
                error!(latitude, longitude, "no airport within search radius");
                AirportResolution::AirportSearchFailed
            }
            Err(err) => {
                error!(latitude, longitude, %err, "nearby-airport request failed");
                AirportResolution::AirportSearchFailed
            }
        }
    }

    async fn geocode_city(&self, city: &str) -> Result<Option<(f64, f64)>, reqwest::Error> {
        let url = format!("https://{RAPIDAPI_HOST}/v1/geo/cities");

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[("namePrefix", city)])
            .send()
            .await?
            .error_for_status()?;

        let parsed: GeoDbCities = res.json().await?;

        Ok(parsed
            .data
            .into_iter()
            .next()
            .map(|c| (c.latitude, c.longitude)))
    }

    async fn nearest_airport(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, reqwest::Error> {
        // GeoDB location ids are ISO 6709: signed latitude then longitude.
        let url = format!(
            "https://{RAPIDAPI_HOST}/v1/geo/locations/{}/nearbyAirports",
            location_id(latitude, longitude)
        );

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[
                ("radius", AIRPORT_SEARCH_RADIUS_KM.to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: GeoDbAirports = res.json().await?;

        Ok(parsed.data.into_iter().next().map(|a| a.name))
    }
}

fn location_id(latitude: f64, longitude: f64) -> String {
    format!("{latitude:+}{longitude:+}")
}

#[async_trait]
impl AirportResolver for GeoDbResolver {
    async fn resolve_nearest_airport(&self, city: &str) -> String {
        self.resolve(city).await.into_name()
    }
}

#[derive(Debug, Deserialize)]
struct GeoDbCity {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize, Default)]
struct GeoDbCities {
    #[serde(default)]
    data: Vec<GeoDbCity>,
}

#[derive(Debug, Deserialize)]
struct GeoDbAirport {
    name: String,
}

#[derive(Debug, Deserialize, Default)]
struct GeoDbAirports {
    #[serde(default)]
    data: Vec<GeoDbAirport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_id_uses_signed_coordinates() {
        assert_eq!(location_id(48.8566, 2.3522), "+48.8566+2.3522");
        assert_eq!(location_id(40.7128, -74.006), "+40.7128-74.006");
        assert_eq!(location_id(-33.8688, 151.2093), "-33.8688+151.2093");
    }

    #[test]
    fn empty_city_payload_yields_no_coordinates() {
        let parsed: GeoDbCities = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parsed.data.is_empty());

        let parsed: GeoDbCities = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn airport_payload_takes_first_name() {
        let parsed: GeoDbAirports = serde_json::from_str(
            r#"{"data": [{"name": "Charles de Gaulle"}, {"name": "Orly"}]}"#,
        )
        .unwrap();

        assert_eq!(
            parsed.data.into_iter().next().map(|a| a.name).as_deref(),
            Some("Charles de Gaulle")
        );
    }
}
