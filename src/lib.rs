//! # Spot Itinerary
//!
//! Saved-spot itinerary ordering and route derivation for a travel guide.
//!
//! This library provides:
//! - A membership set of saved spots and a user-controlled visiting order kept in sync with it
//! - Route paths derived from the visiting order
//! - Nearby-spot search and "locate me" distance ranking using haversine distance
//! - A session object that routes user events to a presentation adapter
//!
//! ## Features
//!
//! - **`async`** - Enable tokio-backed geolocation timeouts
//!
//! ## Quick Start
//!
//! ```rust
//! use spot_itinerary::{Category, Direction, Itinerary, Spot, SpotCatalog, build_path};
//!
//! let catalog = SpotCatalog::from_spots(vec![
//!     Spot::new(1, "Wat Arun", Category::Classics, 13.7437, 100.4888),
//!     Spot::new(2, "Lumphini Park", Category::Parks, 13.7314, 100.5414),
//!     Spot::new(3, "Chinatown", Category::Food, 13.7398, 100.5101),
//! ])
//! .unwrap();
//!
//! let mut itinerary = Itinerary::new();
//! itinerary.toggle(1);
//! itinerary.toggle(2);
//! itinerary.toggle(3);
//! itinerary.move_adjacent(3, Direction::Up);
//! assert_eq!(itinerary.order(), &[1, 3, 2]);
//!
//! let path = build_path(itinerary.order(), &catalog);
//! assert_eq!(path.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{GeolocationError, Result, SpotError};

// Geographic utilities (distance, bounds, polyline length)
pub mod geo_utils;
pub use geo_utils::{distance_km, haversine_km};

// Immutable, indexed spot catalog
pub mod catalog;
pub use catalog::{CardFilter, SpotCatalog};

// Saved-spot membership set
pub mod membership;
pub use membership::SavedSet;

// Visiting order kept in sync with the membership set
pub mod itinerary;
pub use itinerary::{Direction, Itinerary, ItineraryOrder};

// Route path, nearby search and distance ranking
pub mod route;
pub use route::{
    build_path, nearby, nearby_with_config, sort_by_distance_from, NearbyConfig, NearbySpot,
    RankedSpot, RoutePath,
};

// Sequenced geolocation requests
pub mod geolocation;
pub use geolocation::{GeolocationConfig, Geolocator, LocateRequest, LocateResolution};

// Chart data derivation
pub mod stats;
pub use stats::{category_counts, vibe_points, CategoryCount, VibePoint};

// Presentation collaborator interface
pub mod presentation;
pub use presentation::{NullAdapter, PresentationAdapter, ViewSnapshot};

// Session state owning the catalog and itinerary
pub mod session;
pub use session::{SessionConfig, TravelSession, UserEvent};

// ============================================================================
// Core Types
// ============================================================================

/// Identifier of a spot in the catalog.
pub type SpotId = i64;

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use spot_itinerary::GeoPoint;
/// let point = GeoPoint::new(13.7563, 100.5018); // Bangkok
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }
}

/// Bounding box for a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a point lies inside the bounds (edges inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

/// Spot category label.
///
/// Known categories carry a display colour; anything else is kept verbatim
/// in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Nightlife,
    Relax,
    Parks,
    Classics,
    Food,
    Rooftops,
    Other(String),
}

impl Category {
    /// Label as it appears in the catalog data.
    pub fn label(&self) -> &str {
        match self {
            Category::Nightlife => "Nightlife",
            Category::Relax => "Relax",
            Category::Parks => "Parks",
            Category::Classics => "Classics",
            Category::Food => "Food",
            Category::Rooftops => "Rooftops",
            Category::Other(label) => label,
        }
    }

    /// Marker / chart colour as a hex string.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Category::Nightlife => "#D4622B",
            Category::Relax => "#2D9D78",
            Category::Parks => "#1A8A5C",
            Category::Classics => "#D4982B",
            Category::Food => "#C94444",
            Category::Rooftops => "#6366F1",
            Category::Other(_) => "#888",
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Nightlife" => Category::Nightlife,
            "Relax" => Category::Relax,
            "Parks" => Category::Parks,
            "Classics" => Category::Classics,
            "Food" => Category::Food,
            "Rooftops" => Category::Rooftops,
            _ => Category::Other(label),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A travel spot loaded from the catalog.
///
/// Only `id`, `category`, `lat` and `lng` matter to the itinerary core; the
/// remaining fields are carried for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: SpotId,
    pub name: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    /// Comma-separated vibe tags
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub insider_tip: String,
    #[serde(default)]
    pub map_link: String,
    /// Energy score, 0 (chill) to 10 (chaotic)
    #[serde(default)]
    pub chaos_score: f64,
    /// Price score, 0 (free) to 10 (high end)
    #[serde(default)]
    pub cost_score: f64,
    #[serde(default)]
    pub must_do: bool,
}

impl Spot {
    /// Create a spot with empty display fields.
    pub fn new(id: SpotId, name: &str, category: Category, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            category,
            lat,
            lng,
            tagline: String::new(),
            description: String::new(),
            location: String::new(),
            image: String::new(),
            vibe: String::new(),
            insider_tip: String::new(),
            map_link: String::new(),
            chaos_score: 0.0,
            cost_score: 0.0,
            must_do: false,
        }
    }

    /// Coordinates of this spot.
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Vibe tags, trimmed, with empty entries dropped.
    pub fn vibe_tags(&self) -> Vec<&str> {
        self.vibe
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
