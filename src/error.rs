//! Unified error handling for the spot-itinerary library.
//!
//! Itinerary and membership mutations never fail: references to unknown or
//! unsaved spots are no-ops. Errors only arise when building a catalog and
//! when a geolocation request does not produce a position.

use thiserror::Error;

use crate::SpotId;

/// Error type for catalog construction and other fallible operations.
#[derive(Debug, Error)]
pub enum SpotError {
    /// Two catalog records share an id
    #[error("Spot id {id} appears more than once in the catalog")]
    DuplicateSpot { id: SpotId },

    /// A catalog record has coordinates outside the valid lat/lng range
    #[error("Spot {id} has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { id: SpotId, lat: f64, lng: f64 },

    /// The catalog JSON could not be parsed
    #[error("Failed to parse spot catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// A geolocation request failed
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

/// Failure modes of a "locate me" request.
///
/// None of these affect itinerary state, and none are retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The platform has no position source
    #[error("Geolocation is not available")]
    Unavailable,
    /// The user refused the location permission
    #[error("Location permission denied")]
    Denied,
    /// No position arrived within the configured timeout
    #[error("Location request timed out")]
    Timeout,
}

/// Result type alias for spot-itinerary operations.
pub type Result<T> = std::result::Result<T, SpotError>;
