use thiserror::Error;

/// Failures of a weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered but rejected the query (unknown city and the
    /// like); carries the provider's own message text.
    #[error("weather provider could not resolve the location: {0}")]
    NotFound(String),

    /// The provider could not be reached, or its response could not be read.
    #[error("weather provider unreachable")]
    Unreachable(#[from] reqwest::Error),
}

/// Failures of a diversion evaluation.
///
/// Airport resolution never contributes a variant here: it degrades to the
/// `"Unknown Airport"` sentinel inside the resolver instead.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Weather for the arrival location could not be fetched; the flight is
    /// left untouched.
    #[error("could not evaluate weather for the arrival location")]
    WeatherUnavailable(#[from] WeatherError),

    /// The flight store rejected the post-diversion save.
    #[error("failed to persist diverted flight: {0}")]
    Store(anyhow::Error),
}
