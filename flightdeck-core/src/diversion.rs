use tracing::info;

use crate::{
    airport::AirportResolver,
    error::EvaluationError,
    model::{Flight, FlightStatus, WeatherRecord},
    store::FlightStore,
    weather::WeatherFetcher,
};

/// Weather thresholds below/above which an arrival is considered unsafe.
///
/// Policy values, not physics; the defaults are the fixed operational
/// thresholds and callers only override them in tests.
#[derive(Debug, Clone, Copy)]
pub struct SafetyLimits {
    /// Meters.
    pub min_visibility_m: u32,
    /// Meters per second.
    pub max_wind_speed_mps: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            min_visibility_m: 5000,
            max_wind_speed_mps: 15.0,
        }
    }
}

impl SafetyLimits {
    /// True when either condition alone rules the arrival out.
    pub fn is_unsafe(&self, record: &WeatherRecord) -> bool {
        record.visibility_m < self.min_visibility_m
            || record.wind_speed_mps > self.max_wind_speed_mps
    }
}

/// Decides whether a flight must divert based on arrival weather.
///
/// Talks to its collaborators through traits so the whole decision can be
/// exercised without a live HTTP dependency.
#[derive(Debug)]
pub struct DiversionEvaluator<'a> {
    fetcher: &'a dyn WeatherFetcher,
    resolver: &'a dyn AirportResolver,
    store: &'a dyn FlightStore,
    limits: SafetyLimits,
}

impl<'a> DiversionEvaluator<'a> {
    pub fn new(
        fetcher: &'a dyn WeatherFetcher,
        resolver: &'a dyn AirportResolver,
        store: &'a dyn FlightStore,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            store,
            limits: SafetyLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SafetyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch arrival weather for `flight` and divert it if unsafe.
    ///
    /// On diversion, `arrival_location` and `status` are rewritten together
    /// and the flight is persisted; a failed weather lookup aborts before
    /// any mutation. The fetched record is returned either way.
    pub async fn evaluate_and_maybe_divert(
        &self,
        flight: &mut Flight,
    ) -> Result<WeatherRecord, EvaluationError> {
        let record = self.fetcher.fetch_weather(&flight.arrival_location).await?;

        if self.limits.is_unsafe(&record) {
            let substitute = self
                .resolver
                .resolve_nearest_airport(&flight.arrival_location)
                .await;

            info!(
                flight = %flight.flight_number,
                from = %flight.arrival_location,
                to = %substitute,
                visibility_m = record.visibility_m,
                wind_speed_mps = record.wind_speed_mps,
                "unsafe arrival weather, diverting flight"
            );

            flight.arrival_location = substitute;
            flight.status = FlightStatus::Diverted;
            self.store.save(flight).map_err(EvaluationError::Store)?;
        }

        Ok(record)
    }
}
