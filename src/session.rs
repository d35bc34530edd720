//! # Travel Session
//!
//! All per-visit state in one owned object: the catalog, the saved itinerary,
//! the focused spot, the card filter and the last "locate me" result.
//!
//! The presentation layer owns the session and drives it with [`UserEvent`]s
//! and the locate begin/complete pair. Each call runs to completion and
//! pushes freshly derived views to the supplied [`PresentationAdapter`].

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::catalog::{CardFilter, SpotCatalog};
use crate::error::GeolocationError;
use crate::geolocation::{GeolocationConfig, Geolocator, LocateRequest, LocateResolution};
use crate::itinerary::{Direction, Itinerary};
use crate::presentation::{PresentationAdapter, ViewSnapshot};
use crate::route::{
    build_path, nearby_with_config, sort_by_distance_from, NearbyConfig, NearbySpot, RankedSpot,
    RoutePath,
};
use crate::{GeoPoint, Spot, SpotId};

/// Session-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub nearby: NearbyConfig,
    pub geolocation: GeolocationConfig,
}

/// A user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum UserEvent {
    /// Save button on a card or popup
    ToggleSave { id: SpotId },
    /// Up/down arrows in the itinerary list
    MoveAdjacent { id: SpotId, direction: Direction },
    /// Completed drag gesture: `id` dropped onto `target`
    MoveTo { id: SpotId, target: SpotId },
    /// Detail modal opened for a spot
    Focus { id: SpotId },
    /// Detail modal closed
    ClearFocus,
    /// Filter button in the card grid
    SetFilter { filter: CardFilter },
}

/// State for one browsing session.
#[derive(Debug)]
pub struct TravelSession {
    catalog: SpotCatalog,
    itinerary: Itinerary,
    config: SessionConfig,
    focus: Option<SpotId>,
    filter: CardFilter,
    geolocator: Geolocator,
    ranking: Option<Vec<RankedSpot>>,
}

impl TravelSession {
    /// Start a session over a loaded catalog with default configuration.
    pub fn new(catalog: SpotCatalog) -> Self {
        Self::with_config(catalog, SessionConfig::default())
    }

    pub fn with_config(catalog: SpotCatalog, config: SessionConfig) -> Self {
        info!("[session] Started with {} spots", catalog.len());
        Self {
            catalog,
            itinerary: Itinerary::new(),
            geolocator: Geolocator::new(config.geolocation.clone()),
            config,
            focus: None,
            filter: CardFilter::All,
            ranking: None,
        }
    }

    // ========================================================================
    // Event Handling
    // ========================================================================

    /// Apply a user event. Returns `true` if any state changed.
    pub fn handle<A>(&mut self, event: UserEvent, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        debug!("[session] {:?}", event);
        match event {
            UserEvent::ToggleSave { id } => self.toggle_save(id, adapter),
            UserEvent::MoveAdjacent { id, direction } => {
                self.move_adjacent(id, direction, adapter)
            }
            UserEvent::MoveTo { id, target } => self.move_to(id, target, adapter),
            UserEvent::Focus { id } => self.focus_on(id, adapter),
            UserEvent::ClearFocus => self.clear_focus(adapter),
            UserEvent::SetFilter { filter } => self.set_filter(filter, adapter),
        }
    }

    /// Save or unsave a catalog spot. Unknown ids are ignored.
    pub fn toggle_save<A>(&mut self, id: SpotId, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        if !self.catalog.contains(id) {
            debug!("[session] Ignoring save of unknown spot {}", id);
            return false;
        }
        let saved = self.itinerary.toggle(id);
        adapter.membership_changed(id, saved, self.itinerary.len());
        self.publish_itinerary(adapter);
        if self.filter == CardFilter::Saved {
            self.publish_filter(adapter);
        }
        true
    }

    pub fn move_adjacent<A>(&mut self, id: SpotId, direction: Direction, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        let moved = self.itinerary.move_adjacent(id, direction);
        if moved {
            self.publish_itinerary(adapter);
        }
        moved
    }

    pub fn move_to<A>(&mut self, id: SpotId, target: SpotId, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        let moved = self.itinerary.move_to(id, target);
        if moved {
            self.publish_itinerary(adapter);
        }
        moved
    }

    /// Focus a spot and push its nearby list. Unknown ids are ignored.
    pub fn focus_on<A>(&mut self, id: SpotId, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        if !self.catalog.contains(id) {
            debug!("[session] Ignoring focus on unknown spot {}", id);
            return false;
        }
        self.focus = Some(id);
        let nearby = nearby_with_config(id, &self.catalog, &self.config.nearby);
        adapter.nearby_changed(id, &nearby);
        true
    }

    pub fn clear_focus<A>(&mut self, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        if self.focus.take().is_none() {
            return false;
        }
        adapter.focus_cleared();
        true
    }

    pub fn set_filter<A>(&mut self, filter: CardFilter, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.publish_filter(adapter);
        true
    }

    // ========================================================================
    // Locate Me
    // ========================================================================

    /// Issue a position request. Hand the returned ticket back to
    /// [`TravelSession::complete_locate`] when the platform answers.
    pub fn begin_locate(&mut self) -> LocateRequest {
        self.geolocator.begin()
    }

    /// Accept a position answer and re-rank the catalog on success.
    ///
    /// Stale answers are dropped silently. Failures are reported to the
    /// adapter and leave the itinerary and previous ranking untouched.
    pub fn complete_locate<A>(
        &mut self,
        request: &LocateRequest,
        result: std::result::Result<GeoPoint, GeolocationError>,
        adapter: &mut A,
    ) -> LocateResolution
    where
        A: PresentationAdapter + ?Sized,
    {
        let resolution = self.geolocator.resolve(request, result);
        self.apply_resolution(resolution, adapter);
        resolution
    }

    /// [`TravelSession::complete_locate`] with an explicit arrival time.
    pub fn complete_locate_at<A>(
        &mut self,
        request: &LocateRequest,
        result: std::result::Result<GeoPoint, GeolocationError>,
        now: std::time::Instant,
        adapter: &mut A,
    ) -> LocateResolution
    where
        A: PresentationAdapter + ?Sized,
    {
        let resolution = self.geolocator.resolve_at(request, result, now);
        self.apply_resolution(resolution, adapter);
        resolution
    }

    fn apply_resolution<A>(&mut self, resolution: LocateResolution, adapter: &mut A)
    where
        A: PresentationAdapter + ?Sized,
    {
        match resolution {
            LocateResolution::Located(point) => {
                let ranked = sort_by_distance_from(point.lat, point.lng, &self.catalog);
                adapter.ranking_changed(&ranked);
                self.ranking = Some(ranked);
            }
            LocateResolution::Failed(err) => adapter.locate_failed(err),
            LocateResolution::Stale => {}
        }
    }

    // ========================================================================
    // Derived Views
    // ========================================================================

    pub fn catalog(&self) -> &SpotCatalog {
        &self.catalog
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current visiting order.
    pub fn order(&self) -> &[SpotId] {
        self.itinerary.order()
    }

    pub fn is_saved(&self, id: SpotId) -> bool {
        self.itinerary.contains(id)
    }

    pub fn saved_count(&self) -> usize {
        self.itinerary.len()
    }

    /// Route through the saved spots, recomputed on each call.
    pub fn route(&self) -> RoutePath {
        build_path(self.itinerary.order(), &self.catalog)
    }

    pub fn focus(&self) -> Option<SpotId> {
        self.focus
    }

    /// Nearby list for the focused spot, empty without a focus.
    pub fn nearby(&self) -> Vec<NearbySpot> {
        self.focus
            .map(|id| nearby_with_config(id, &self.catalog, &self.config.nearby))
            .unwrap_or_default()
    }

    pub fn filter(&self) -> &CardFilter {
        &self.filter
    }

    /// Spots the card grid shows under the current filter.
    pub fn visible_spots(&self) -> Vec<&Spot> {
        self.catalog.visible_spots(&self.filter, self.itinerary.saved())
    }

    /// Distance ranking from the last successful locate, if any.
    pub fn ranking(&self) -> Option<&[RankedSpot]> {
        self.ranking.as_deref()
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.geolocator.position()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let route = self.route();
        ViewSnapshot {
            saved_count: self.saved_count(),
            order: self.order().to_vec(),
            route_km: route.total_km(),
            route,
            focus: self.focus,
            nearby: self.nearby(),
            ranking: self.ranking.clone(),
            filter: self.filter.clone(),
            visible: self.visible_ids(),
        }
    }

    fn visible_ids(&self) -> Vec<SpotId> {
        self.visible_spots().iter().map(|s| s.id).collect()
    }

    fn publish_itinerary<A>(&self, adapter: &mut A)
    where
        A: PresentationAdapter + ?Sized,
    {
        adapter.order_changed(self.itinerary.order());
        adapter.route_changed(&self.route());
    }

    fn publish_filter<A>(&self, adapter: &mut A)
    where
        A: PresentationAdapter + ?Sized,
    {
        adapter.filter_changed(&self.filter, &self.visible_ids());
    }
}
