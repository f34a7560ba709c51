use anyhow::{Result, anyhow};
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Mutex,
};

use crate::model::{Flight, FlightStatus};

/// Persistence collaborator for flight records, keyed by flight number.
///
/// The diversion evaluator only needs [`FlightStore::save`]; the remaining
/// operations back the tracking surfaces (listing, bulk status updates,
/// table clearing).
pub trait FlightStore: Send + Sync + Debug {
    fn get(&self, flight_number: &str) -> Result<Option<Flight>>;

    /// All tracked flights, ordered by flight number.
    fn list(&self) -> Result<Vec<Flight>>;

    /// Create or replace the record for `flight.flight_number`.
    fn save(&self, flight: &Flight) -> Result<()>;

    /// Remove one flight; returns whether a record existed.
    fn delete(&self, flight_number: &str) -> Result<bool>;

    /// Drop every tracked flight.
    fn clear(&self) -> Result<()>;

    /// Update only the status of an existing flight.
    fn set_status(&self, flight_number: &str, status: FlightStatus) -> Result<()> {
        let mut flight = self
            .get(flight_number)?
            .ok_or_else(|| anyhow!("Flight not found: {flight_number}"))?;
        flight.status = status;
        self.save(&flight)
    }
}

/// In-memory store, used by tests and as a reference implementation.
#[derive(Debug, Default)]
pub struct MemoryFlightStore {
    flights: Mutex<HashMap<String, Flight>>,
}

impl MemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Flight>>> {
        self.flights
            .lock()
            .map_err(|_| anyhow!("flight store lock poisoned"))
    }
}

impl FlightStore for MemoryFlightStore {
    fn get(&self, flight_number: &str) -> Result<Option<Flight>> {
        Ok(self.lock()?.get(flight_number).cloned())
    }

    fn list(&self) -> Result<Vec<Flight>> {
        let mut flights: Vec<Flight> = self.lock()?.values().cloned().collect();
        flights.sort_by(|a, b| a.flight_number.cmp(&b.flight_number));
        Ok(flights)
    }

    fn save(&self, flight: &Flight) -> Result<()> {
        self.lock()?
            .insert(flight.flight_number.clone(), flight.clone());
        Ok(())
    }

    fn delete(&self, flight_number: &str) -> Result<bool> {
        Ok(self.lock()?.remove(flight_number).is_some())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}
