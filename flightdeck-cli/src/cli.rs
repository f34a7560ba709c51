use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use flightdeck_core::{
    Config, DiversionEvaluator, Flight, FlightStatus, FlightStore, GeoDbResolver,
    OpenWeatherFetcher, WeatherError, WeatherFetcher, WeatherRecord,
};
use inquire::Text;

use crate::store::JsonFileStore;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "flightdeck", version, about = "Flight tracking and weather diversion CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure API credentials for the weather and airport providers.
    Configure,

    /// Show current weather and short-range forecast for a city.
    Weather {
        /// City name.
        city: String,
    },

    /// Manage tracked flights.
    Flight {
        #[command(subcommand)]
        action: FlightAction,
    },

    /// Check arrival weather for a flight and divert it if unsafe.
    Divert {
        /// Flight number of a tracked flight.
        flight_number: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FlightAction {
    /// Create a flight, or update it in place if the number is already tracked.
    Set {
        flight_number: String,

        /// Departure location.
        #[arg(long)]
        from: String,

        /// Arrival location.
        #[arg(long)]
        to: String,

        /// Status text, e.g. "On Time" or "Delayed".
        #[arg(long)]
        status: Option<String>,

        /// Estimated arrival time.
        #[arg(long)]
        eta: Option<String>,
    },

    /// List all tracked flights.
    List,

    /// Update only the status of a flight.
    Status {
        flight_number: String,
        status: String,
    },

    /// Stop tracking one flight.
    Remove { flight_number: String },

    /// Stop tracking all flights.
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Weather { city } => show_weather(&city).await,
            Command::Flight { action } => flight_action(action),
            Command::Divert { flight_number } => divert(&flight_number).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let weather_key = Text::new("Weather API key (OpenWeather):")
        .with_initial_value(config.weather_api_key.as_deref().unwrap_or(""))
        .prompt()?;
    let airport_key = Text::new("Airport API key (GeoDB on RapidAPI):")
        .with_initial_value(config.airport_api_key.as_deref().unwrap_or(""))
        .prompt()?;

    config.weather_api_key = some_if_nonempty(weather_key);
    config.airport_api_key = some_if_nonempty(airport_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn some_if_nonempty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

async fn show_weather(city: &str) -> Result<()> {
    let config = Config::load()?;
    let fetcher = OpenWeatherFetcher::new(config.require_weather_api_key()?.to_string());

    let record = match fetcher.fetch_weather(city).await {
        Ok(record) => record,
        // The city-lookup flow surfaces the provider's own message.
        Err(WeatherError::NotFound(message)) => bail!("{message}"),
        Err(WeatherError::Unreachable(_)) => {
            bail!("Could not fetch weather data. Please try again later.")
        }
    };

    print_record(&record);

    let bundle = fetcher.fetch_forecast(city).await?;
    if !bundle.entries.is_empty() {
        println!("\nForecast:");
        for entry in &bundle.entries {
            println!(
                "  {}  {:>6.2} C  {}",
                entry.time, entry.temperature_c, entry.description
            );
        }
    }
    for alert in &bundle.alerts {
        println!("\nAlert: {} ({} - {})", alert.event, alert.start, alert.end);
        if !alert.description.is_empty() {
            println!("  {}", alert.description);
        }
    }

    Ok(())
}

fn print_record(record: &WeatherRecord) {
    println!("{}, {} - {}", record.city, record.country, record.description);
    println!(
        "  temperature {:.2} C (feels like {:.2} C, min {:.2} C, max {:.2} C)",
        record.temperature_c, record.feels_like_c, record.temp_min_c, record.temp_max_c
    );
    println!(
        "  pressure {} hPa, humidity {}%, visibility {} m",
        record.pressure, record.humidity, record.visibility_m
    );
    println!(
        "  wind {:.1} m/s at {} deg",
        record.wind_speed_mps, record.wind_deg
    );
    println!("  sunrise {} UTC, sunset {} UTC", record.sunrise, record.sunset);
}

fn flight_action(action: FlightAction) -> Result<()> {
    let store = JsonFileStore::open_default()?;

    match action {
        FlightAction::Set {
            flight_number,
            from,
            to,
            status,
            eta,
        } => {
            // Update in place when the number is already tracked, keeping
            // the original creation timestamp.
            let mut flight = store
                .get(&flight_number)?
                .unwrap_or_else(|| Flight::new(flight_number.clone(), "", ""));

            flight.departure_location = from;
            flight.arrival_location = to;
            if let Some(status) = status {
                flight.status = FlightStatus::from(status);
            }
            flight.estimated_arrival_time = eta;

            store.save(&flight)?;
            println!("Flight information updated.");
        }
        FlightAction::List => {
            let flights = store.list()?;
            if flights.is_empty() {
                println!("No tracked flights.");
            }
            for flight in flights {
                println!(
                    "{}  {} -> {}  [{}]{}",
                    flight.flight_number,
                    flight.departure_location,
                    flight.arrival_location,
                    flight.status,
                    flight
                        .estimated_arrival_time
                        .as_deref()
                        .map(|eta| format!("  ETA {eta}"))
                        .unwrap_or_default()
                );
            }
        }
        FlightAction::Status {
            flight_number,
            status,
        } => {
            store.set_status(&flight_number, FlightStatus::from(status))?;
            println!("Flight status updated.");
        }
        FlightAction::Remove { flight_number } => {
            if store.delete(&flight_number)? {
                println!("Flight {flight_number} removed.");
            } else {
                bail!("Flight not found: {flight_number}");
            }
        }
        FlightAction::Clear => {
            store.clear()?;
            println!("Flight table cleared.");
        }
    }

    Ok(())
}

async fn divert(flight_number: &str) -> Result<()> {
    let config = Config::load()?;
    let fetcher = OpenWeatherFetcher::new(config.require_weather_api_key()?.to_string());
    let resolver = GeoDbResolver::new(config.require_airport_api_key()?.to_string());
    let store = JsonFileStore::open_default()?;

    // Precondition checked here, outside the evaluator.
    let mut flight = store
        .get(flight_number)?
        .ok_or_else(|| anyhow!("Flight not found: {flight_number}"))?;

    let evaluator = DiversionEvaluator::new(&fetcher, &resolver, &store);
    let record = match evaluator.evaluate_and_maybe_divert(&mut flight).await {
        Ok(record) => record,
        Err(err) => bail!("Could not fetch weather data ({err})"),
    };

    print_record(&record);

    if flight.status == FlightStatus::Diverted {
        println!(
            "\nFlight {} diverted to {}.",
            flight.flight_number, flight.arrival_location
        );
    } else {
        println!(
            "\nArrival weather is within limits; flight {} continues to {}.",
            flight.flight_number, flight.arrival_location
        );
    }

    Ok(())
}
