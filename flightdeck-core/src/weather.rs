use crate::{
    error::WeatherError,
    model::{ForecastBundle, WeatherRecord},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherFetcher;

/// Fetches normalized weather for a location.
///
/// The diversion evaluator talks to this trait only, so tests can substitute
/// a canned fetcher instead of a live HTTP provider.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Current conditions for `location`.
    async fn fetch_weather(&self, location: &str) -> Result<WeatherRecord, WeatherError>;

    /// Short-range forecast for `location`, sliced to the first five entries.
    async fn fetch_forecast(&self, location: &str) -> Result<ForecastBundle, WeatherError>;
}

/// Kelvin to Celsius, rounded to two decimals.
pub fn celsius_from_kelvin(kelvin: f64) -> f64 {
    ((kelvin - 273.15) * 100.0).round() / 100.0
}

/// Epoch seconds to a `YYYY-MM-DD HH:MM:SS` UTC string.
pub fn format_utc_timestamp(epoch_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0)
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_matches_reference_values() {
        assert_eq!(celsius_from_kelvin(273.15), 0.0);
        assert_eq!(celsius_from_kelvin(300.0), 26.85);
        assert_eq!(celsius_from_kelvin(255.372), -17.78);
    }

    #[test]
    fn kelvin_conversion_rounds_to_two_decimals() {
        for k in [0.0, 250.111, 273.15, 288.705, 310.999] {
            let c = celsius_from_kelvin(k);
            assert!((c - (k - 273.15)).abs() < 0.01);
            assert_eq!(c, (c * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn timestamp_formatting() {
        // 2024-06-01 12:30:45 UTC
        assert_eq!(format_utc_timestamp(1717245045), "2024-06-01 12:30:45");
        assert_eq!(format_utc_timestamp(0), "1970-01-01 00:00:00");
    }
}
