use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{ForecastBundle, ForecastEntry, WeatherAlert, WeatherRecord},
    weather::{celsius_from_kelvin, format_utc_timestamp},
};

use super::WeatherFetcher;
use async_trait::async_trait;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const FORECAST_ENTRIES: usize = 5;

/// Weather fetcher backed by the OpenWeather HTTP API.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    api_key: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        location: &str,
    ) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            // OpenWeather reports query problems (unknown city, bad key) with
            // a non-2xx status and a JSON body carrying a `message` field.
            let message = res
                .json::<OwErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("provider returned status {status}"));
            return Err(WeatherError::NotFound(message));
        }

        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch_weather(&self, location: &str) -> Result<WeatherRecord, WeatherError> {
        let url = "https://api.openweathermap.org/data/2.5/weather";
        let parsed: OwCurrentResponse = self.get_json(url, location).await?;
        Ok(record_from_current(parsed))
    }

    async fn fetch_forecast(&self, location: &str) -> Result<ForecastBundle, WeatherError> {
        let url = "https://api.openweathermap.org/data/2.5/forecast";
        let parsed: OwForecastResponse = self.get_json(url, location).await?;
        Ok(bundle_from_forecast(parsed))
    }
}

fn record_from_current(parsed: OwCurrentResponse) -> WeatherRecord {
    let (description, icon) = parsed
        .weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_default();

    WeatherRecord {
        city: parsed.name,
        temperature_c: celsius_from_kelvin(parsed.main.temp),
        feels_like_c: celsius_from_kelvin(parsed.main.feels_like),
        temp_min_c: celsius_from_kelvin(parsed.main.temp_min),
        temp_max_c: celsius_from_kelvin(parsed.main.temp_max),
        pressure: parsed.main.pressure,
        humidity: parsed.main.humidity,
        visibility_m: parsed.visibility.unwrap_or(0),
        wind_speed_mps: parsed.wind.speed,
        wind_deg: parsed.wind.deg,
        description,
        icon,
        country: parsed.sys.country,
        sunrise: format_utc_timestamp(parsed.sys.sunrise),
        sunset: format_utc_timestamp(parsed.sys.sunset),
    }
}

fn bundle_from_forecast(parsed: OwForecastResponse) -> ForecastBundle {
    let entries = parsed
        .list
        .into_iter()
        .take(FORECAST_ENTRIES)
        .map(|entry| {
            let (description, icon) = entry
                .weather
                .first()
                .map(|w| (w.description.clone(), w.icon.clone()))
                .unwrap_or_default();

            ForecastEntry {
                time: format_utc_timestamp(entry.dt),
                temperature_c: celsius_from_kelvin(entry.main.temp),
                description,
                icon,
            }
        })
        .collect();

    let alerts = parsed
        .alerts
        .into_iter()
        .map(|alert| WeatherAlert {
            event: alert.event,
            start: format_utc_timestamp(alert.start),
            end: format_utc_timestamp(alert.end),
            description: alert.description,
        })
        .collect();

    ForecastBundle { entries, alerts }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u32,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    visibility: Option<u32>,
    wind: OwWind,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize, Default)]
struct OwAlert {
    #[serde(default)]
    event: String,
    #[serde(default)]
    start: i64,
    #[serde(default)]
    end: i64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
    #[serde(default)]
    alerts: Vec<OwAlert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_current() -> OwCurrentResponse {
        serde_json::from_str(
            r#"{
                "name": "Paris",
                "main": {
                    "temp": 288.15,
                    "feels_like": 287.0,
                    "temp_min": 285.372,
                    "temp_max": 290.0,
                    "pressure": 1013,
                    "humidity": 72
                },
                "visibility": 3000,
                "wind": {"speed": 5.1, "deg": 240},
                "weather": [{"description": "light rain", "icon": "10d"}],
                "sys": {"country": "FR", "sunrise": 1717216200, "sunset": 1717273800}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn current_response_maps_to_record() {
        let record = record_from_current(sample_current());

        assert_eq!(record.city, "Paris");
        assert_eq!(record.temperature_c, 15.0);
        assert_eq!(record.temp_min_c, 12.22);
        assert_eq!(record.visibility_m, 3000);
        assert_eq!(record.wind_speed_mps, 5.1);
        assert_eq!(record.description, "light rain");
        assert_eq!(record.country, "FR");
        assert_eq!(record.sunrise, "2024-06-01 04:30:00");
    }

    #[test]
    fn missing_visibility_defaults_to_zero() {
        let mut parsed = sample_current();
        parsed.visibility = None;

        let record = record_from_current(parsed);
        assert_eq!(record.visibility_m, 0);
    }

    #[test]
    fn forecast_is_sliced_to_five_entries() {
        let entry = r#"{
            "dt": 1717245045,
            "main": {"temp": 293.15},
            "weather": [{"description": "clear sky", "icon": "01d"}]
        }"#;
        let list = format!("[{}]", [entry; 8].join(","));
        let parsed: OwForecastResponse =
            serde_json::from_str(&format!(r#"{{"list": {list}}}"#)).unwrap();

        let bundle = bundle_from_forecast(parsed);
        assert_eq!(bundle.entries.len(), 5);
        assert_eq!(bundle.entries[0].temperature_c, 20.0);
        assert_eq!(bundle.entries[0].time, "2024-06-01 12:30:45");
        assert!(bundle.alerts.is_empty());
    }

    #[test]
    fn forecast_alerts_get_formatted_windows() {
        let parsed: OwForecastResponse = serde_json::from_str(
            r#"{
                "list": [],
                "alerts": [{
                    "event": "Wind advisory",
                    "start": 1717245045,
                    "end": 1717248645,
                    "description": "strong gusts"
                }]
            }"#,
        )
        .unwrap();

        let bundle = bundle_from_forecast(parsed);
        assert_eq!(bundle.alerts.len(), 1);
        assert_eq!(bundle.alerts[0].start, "2024-06-01 12:30:45");
        assert_eq!(bundle.alerts[0].end, "2024-06-01 13:30:45");
    }
}
