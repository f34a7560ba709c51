use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use flightdeck_core::{Flight, FlightStore};
use std::{fs, path::PathBuf};

/// Flight store backed by a JSON file in the platform data directory.
///
/// Every operation reads the whole file and writes it back; fine for the
/// handful of flights a single operator tracks.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at the default platform location.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "flightdeck", "flightdeck")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self {
            path: dirs.data_dir().join("flights.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<Vec<Flight>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read flight store: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse flight store: {}", self.path.display()))
    }

    fn write_all(&self, flights: &[Flight]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(flights)
            .context("Failed to serialize flight records")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write flight store: {}", self.path.display()))
    }
}

impl FlightStore for JsonFileStore {
    fn get(&self, flight_number: &str) -> Result<Option<Flight>> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|f| f.flight_number == flight_number))
    }

    fn list(&self) -> Result<Vec<Flight>> {
        let mut flights = self.read_all()?;
        flights.sort_by(|a, b| a.flight_number.cmp(&b.flight_number));
        Ok(flights)
    }

    fn save(&self, flight: &Flight) -> Result<()> {
        let mut flights = self.read_all()?;
        match flights
            .iter_mut()
            .find(|f| f.flight_number == flight.flight_number)
        {
            Some(existing) => *existing = flight.clone(),
            None => flights.push(flight.clone()),
        }
        self.write_all(&flights)
    }

    fn delete(&self, flight_number: &str) -> Result<bool> {
        let mut flights = self.read_all()?;
        let before = flights.len();
        flights.retain(|f| f.flight_number != flight_number);

        let removed = flights.len() != before;
        if removed {
            self.write_all(&flights)?;
        }
        Ok(removed)
    }

    fn clear(&self) -> Result<()> {
        self.write_all(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_core::FlightStatus;

    fn temp_store(name: &str) -> JsonFileStore {
        let path = std::env::temp_dir().join(format!(
            "flightdeck-store-test-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        JsonFileStore::at(path)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = temp_store("empty");
        assert!(store.list().unwrap().is_empty());
        assert!(store.get("AF10").unwrap().is_none());
    }

    #[test]
    fn save_get_roundtrip_through_file() {
        let store = temp_store("roundtrip");

        store.save(&Flight::new("AF10", "Madrid", "Paris")).unwrap();
        store.save(&Flight::new("BA42", "London", "Oslo")).unwrap();

        let loaded = store.get("AF10").unwrap().expect("flight must exist");
        assert_eq!(loaded.arrival_location, "Paris");
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn save_updates_in_place() {
        let store = temp_store("update");
        store.save(&Flight::new("AF10", "Madrid", "Paris")).unwrap();

        let mut flight = store.get("AF10").unwrap().unwrap();
        flight.status = FlightStatus::Diverted;
        flight.arrival_location = "Charles de Gaulle".to_string();
        store.save(&flight).unwrap();

        let loaded = store.get("AF10").unwrap().unwrap();
        assert_eq!(loaded.status, FlightStatus::Diverted);
        assert_eq!(loaded.arrival_location, "Charles de Gaulle");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn delete_and_clear_persist() {
        let store = temp_store("delete");
        store.save(&Flight::new("AF10", "Madrid", "Paris")).unwrap();
        store.save(&Flight::new("BA42", "London", "Oslo")).unwrap();

        assert!(store.delete("AF10").unwrap());
        assert!(!store.delete("AF10").unwrap());
        assert_eq!(store.list().unwrap().len(), 1);

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
