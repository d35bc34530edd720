//! # Presentation Adapter
//!
//! The seam between the session and whatever renders the map, card grid and
//! itinerary list. The session calls these hooks after each mutation with
//! fresh, fully derived data; adapters never reach into session state.
//!
//! Adapters that poll instead of listening can take a [`ViewSnapshot`].

use serde::{Deserialize, Serialize};

use crate::catalog::CardFilter;
use crate::error::GeolocationError;
use crate::route::{NearbySpot, RankedSpot, RoutePath};
use crate::SpotId;

/// Receives view updates from a [`crate::TravelSession`].
///
/// Every hook defaults to doing nothing, so an adapter only implements the
/// views it actually draws.
pub trait PresentationAdapter {
    /// A spot was saved or unsaved. `saved_count` feeds the navbar badge.
    fn membership_changed(&mut self, _id: SpotId, _saved: bool, _saved_count: usize) {}

    /// The itinerary order changed (save, unsave or reorder).
    fn order_changed(&mut self, _order: &[SpotId]) {}

    /// The route through the itinerary was recomputed. May be empty.
    fn route_changed(&mut self, _route: &RoutePath) {}

    /// The nearby list for the focused spot was recomputed.
    fn nearby_changed(&mut self, _focus: SpotId, _nearby: &[NearbySpot]) {}

    /// The focus was cleared (modal closed).
    fn focus_cleared(&mut self) {}

    /// The catalog was re-ranked by distance from the user.
    fn ranking_changed(&mut self, _ranked: &[RankedSpot]) {}

    /// A locate request failed; show a notification.
    fn locate_failed(&mut self, _error: GeolocationError) {}

    /// The card filter or the saved set changed what the grid shows.
    fn filter_changed(&mut self, _filter: &CardFilter, _visible: &[SpotId]) {}
}

/// Adapter that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAdapter;

impl PresentationAdapter for NullAdapter {}

/// Everything a view needs, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub saved_count: usize,
    pub order: Vec<SpotId>,
    pub route: RoutePath,
    pub route_km: f64,
    pub focus: Option<SpotId>,
    pub nearby: Vec<NearbySpot>,
    pub ranking: Option<Vec<RankedSpot>>,
    pub filter: CardFilter,
    pub visible: Vec<SpotId>,
}

impl ViewSnapshot {
    /// Serialize for a JS/webview consumer.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
