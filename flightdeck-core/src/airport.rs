use async_trait::async_trait;
use std::fmt::Debug;

pub mod geodb;

pub use geodb::GeoDbResolver;

/// Placeholder name returned when no airport could be resolved.
pub const UNKNOWN_AIRPORT: &str = "Unknown Airport";

/// Outcome of a nearest-airport lookup, kept tagged for diagnostics.
///
/// Callers of [`AirportResolver`] never see the failure variants; they are
/// collapsed to [`UNKNOWN_AIRPORT`] at the trait boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirportResolution {
    Resolved(String),
    GeocodeFailed,
    AirportSearchFailed,
}

impl AirportResolution {
    /// Collapse to the display name handed to callers.
    pub fn into_name(self) -> String {
        match self {
            AirportResolution::Resolved(name) => name,
            AirportResolution::GeocodeFailed | AirportResolution::AirportSearchFailed => {
                UNKNOWN_AIRPORT.to_string()
            }
        }
    }
}

/// Resolves the nearest airport to a city.
///
/// Total by contract: any upstream failure degrades to the
/// [`UNKNOWN_AIRPORT`] sentinel instead of an error.
#[async_trait]
pub trait AirportResolver: Send + Sync + Debug {
    async fn resolve_nearest_airport(&self, city: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_name_passes_through() {
        let res = AirportResolution::Resolved("Charles de Gaulle".to_string());
        assert_eq!(res.into_name(), "Charles de Gaulle");
    }

    #[test]
    fn failures_collapse_to_sentinel() {
        assert_eq!(AirportResolution::GeocodeFailed.into_name(), UNKNOWN_AIRPORT);
        assert_eq!(
            AirportResolution::AirportSearchFailed.into_name(),
            UNKNOWN_AIRPORT
        );
    }
}
