//! Core library for the `flightdeck` diversion tracker.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather fetching and airport resolution over trait seams
//! - The diversion decision procedure and its safety thresholds
//! - Shared domain models (weather records, flights) and the flight store
//!
//! It is used by `flightdeck-cli`, but can also be reused by other binaries or services.

pub mod airport;
pub mod config;
pub mod diversion;
pub mod error;
pub mod model;
pub mod store;
pub mod weather;

pub use airport::{AirportResolver, GeoDbResolver, UNKNOWN_AIRPORT};
pub use config::Config;
pub use diversion::{DiversionEvaluator, SafetyLimits};
pub use error::{EvaluationError, WeatherError};
pub use model::{Flight, FlightStatus, ForecastBundle, ForecastEntry, WeatherRecord};
pub use store::{FlightStore, MemoryFlightStore};
pub use weather::{OpenWeatherFetcher, WeatherFetcher};
