use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized current-conditions report for one location.
///
/// Built once per lookup from the provider payload and discarded after use;
/// temperatures are Celsius rounded to two decimals, sunrise/sunset are
/// `YYYY-MM-DD HH:MM:SS` UTC strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// hPa.
    pub pressure: u32,
    /// Percent.
    pub humidity: u32,
    /// Meters; 0 when the provider omits the field.
    pub visibility_m: u32,
    /// Meters per second.
    pub wind_speed_mps: f64,
    /// Degrees.
    pub wind_deg: u32,
    pub description: String,
    pub icon: String,
    pub country: String,
    pub sunrise: String,
    pub sunset: String,
}

/// One entry of the short-range forecast (at most five are kept).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// `YYYY-MM-DD HH:MM:SS` UTC.
    pub time: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon: String,
}

/// Provider-issued weather alert with formatted validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub event: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

/// Forecast entries plus any active alerts for a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub entries: Vec<ForecastEntry>,
    pub alerts: Vec<WeatherAlert>,
}

/// Status of a tracked flight.
///
/// Known statuses get their own variant; anything else round-trips through
/// `Other` so records written by older or newer tools stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Diverted,
    Other(String),
}

impl FlightStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Diverted => "Diverted",
            FlightStatus::Other(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FlightStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "On Time" => FlightStatus::OnTime,
            "Delayed" => FlightStatus::Delayed,
            "Diverted" => FlightStatus::Diverted,
            _ => FlightStatus::Other(value),
        }
    }
}

impl From<FlightStatus> for String {
    fn from(value: FlightStatus) -> Self {
        value.as_str().to_string()
    }
}

/// A tracked flight.
///
/// `flight_number` is unique among active records; `arrival_location` and
/// `status` are rewritten together when a diversion triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub flight_number: String,
    pub departure_location: String,
    pub arrival_location: String,
    pub status: FlightStatus,
    pub estimated_arrival_time: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Flight {
    pub fn new(
        flight_number: impl Into<String>,
        departure_location: impl Into<String>,
        arrival_location: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            departure_location: departure_location.into(),
            arrival_location: arrival_location.into(),
            status: FlightStatus::OnTime,
            estimated_arrival_time: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_roundtrip() {
        for s in ["On Time", "Delayed", "Diverted"] {
            let status = FlightStatus::from(s.to_string());
            assert_eq!(status.as_str(), s);
            assert!(!matches!(status, FlightStatus::Other(_)));
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = FlightStatus::from("Boarding".to_string());
        assert_eq!(status, FlightStatus::Other("Boarding".to_string()));
        assert_eq!(status.as_str(), "Boarding");
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_string(&FlightStatus::Diverted).unwrap();
        assert_eq!(json, "\"Diverted\"");

        let parsed: FlightStatus = serde_json::from_str("\"Delayed\"").unwrap();
        assert_eq!(parsed, FlightStatus::Delayed);
    }

    #[test]
    fn new_flight_defaults_to_on_time() {
        let flight = Flight::new("AA100", "Madrid", "Paris");
        assert_eq!(flight.status, FlightStatus::OnTime);
        assert!(flight.estimated_arrival_time.is_none());
    }
}
