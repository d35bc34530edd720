//! End-to-end session scenarios.
//!
//! Drives a `TravelSession` through user events the way the presentation layer
//! would, and checks what the adapter receives.
//!
//! Run with: `cargo test --test session_scenarios`

use std::time::Duration;

use spot_itinerary::{
    build_path, distance_km, nearby, CardFilter, Category, Direction, GeoPoint,
    GeolocationError, LocateResolution, NearbySpot, PresentationAdapter, RankedSpot, RoutePath,
    Spot, SpotCatalog, SpotId, TravelSession, UserEvent,
};

const A: SpotId = 1;
const B: SpotId = 2;
const C: SpotId = 3;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Catalog with two nearby spots in Bangkok and one far to the north.
fn abc_catalog() -> SpotCatalog {
    SpotCatalog::from_spots(vec![
        Spot::new(A, "A", Category::Classics, 13.70, 100.50),
        Spot::new(B, "B", Category::Food, 13.75, 100.55),
        Spot::new(C, "C", Category::Parks, 20.0, 100.0),
    ])
    .expect("valid catalog")
}

/// Adapter that records every update it receives.
#[derive(Debug, Default)]
struct RecordingAdapter {
    memberships: Vec<(SpotId, bool, usize)>,
    orders: Vec<Vec<SpotId>>,
    routes: Vec<RoutePath>,
    nearby: Vec<(SpotId, Vec<NearbySpot>)>,
    rankings: Vec<Vec<RankedSpot>>,
    failures: Vec<GeolocationError>,
    filters: Vec<(CardFilter, Vec<SpotId>)>,
    focus_cleared: usize,
}

impl PresentationAdapter for RecordingAdapter {
    fn membership_changed(&mut self, id: SpotId, saved: bool, saved_count: usize) {
        self.memberships.push((id, saved, saved_count));
    }

    fn order_changed(&mut self, order: &[SpotId]) {
        self.orders.push(order.to_vec());
    }

    fn route_changed(&mut self, route: &RoutePath) {
        self.routes.push(route.clone());
    }

    fn nearby_changed(&mut self, focus: SpotId, nearby: &[NearbySpot]) {
        self.nearby.push((focus, nearby.to_vec()));
    }

    fn focus_cleared(&mut self) {
        self.focus_cleared += 1;
    }

    fn ranking_changed(&mut self, ranked: &[RankedSpot]) {
        self.rankings.push(ranked.to_vec());
    }

    fn locate_failed(&mut self, error: GeolocationError) {
        self.failures.push(error);
    }

    fn filter_changed(&mut self, filter: &CardFilter, visible: &[SpotId]) {
        self.filters.push((filter.clone(), visible.to_vec()));
    }
}

// ============================================================================
// Itinerary Scenarios
// ============================================================================

#[test]
fn test_save_reorder_unsave_scenario() {
    init_logging();
    let catalog = abc_catalog();
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    for id in [A, B, C] {
        session.handle(UserEvent::ToggleSave { id }, &mut adapter);
    }
    assert_eq!(session.order(), &[A, B, C]);

    session.handle(
        UserEvent::MoveAdjacent {
            id: C,
            direction: Direction::Up,
        },
        &mut adapter,
    );
    assert_eq!(session.order(), &[A, C, B]);

    session.handle(UserEvent::ToggleSave { id: B }, &mut adapter);
    assert_eq!(session.order(), &[A, C]);

    let route = session.route();
    assert_eq!(
        route.points,
        vec![catalog.point(A).unwrap(), catalog.point(C).unwrap()]
    );
    assert_eq!(route, build_path(&[A, C], &catalog));

    // Every mutation published order and route together
    assert_eq!(adapter.orders.len(), 5);
    assert_eq!(adapter.routes.len(), 5);
    assert_eq!(adapter.orders.last().unwrap(), &vec![A, C]);
    assert!(adapter.routes[0].is_empty());
    assert_eq!(adapter.routes[1].len(), 2);
    assert_eq!(
        adapter.memberships,
        vec![(A, true, 1), (B, true, 2), (C, true, 3), (B, false, 2)]
    );
}

#[test]
fn test_noop_reorders_publish_nothing() {
    init_logging();
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    session.toggle_save(A, &mut adapter);
    session.toggle_save(B, &mut adapter);
    let published = adapter.orders.len();

    assert!(!session.move_adjacent(A, Direction::Up, &mut adapter));
    assert!(!session.move_adjacent(B, Direction::Down, &mut adapter));
    assert!(!session.move_to(A, A, &mut adapter));
    assert!(!session.move_to(A, C, &mut adapter));
    assert!(!session.move_adjacent(C, Direction::Up, &mut adapter));

    assert_eq!(adapter.orders.len(), published);
    assert_eq!(session.order(), &[A, B]);
}

#[test]
fn test_drag_to_front() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();
    for id in [A, B, C] {
        session.toggle_save(id, &mut adapter);
    }

    assert!(session.handle(UserEvent::MoveTo { id: C, target: A }, &mut adapter));
    assert_eq!(session.order(), &[C, A, B]);
    assert_eq!(adapter.routes.last().unwrap().ids, vec![C, A, B]);
}

#[test]
fn test_saved_filter_follows_toggles() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    assert!(session.handle(
        UserEvent::SetFilter {
            filter: CardFilter::Saved
        },
        &mut adapter
    ));
    assert_eq!(adapter.filters.last().unwrap().1, Vec::<SpotId>::new());

    session.toggle_save(C, &mut adapter);
    session.toggle_save(A, &mut adapter);
    // Card grid stays in catalog order
    assert_eq!(adapter.filters.last().unwrap().1, vec![A, C]);

    assert!(!session.set_filter(CardFilter::Saved, &mut adapter));
    session.set_filter(CardFilter::Category(Category::Food), &mut adapter);
    let visible: Vec<SpotId> = session.visible_spots().iter().map(|s| s.id).collect();
    assert_eq!(visible, vec![B]);
}

// ============================================================================
// Nearby Scenarios
// ============================================================================

#[test]
fn test_radius_query_scenario() {
    let catalog = abc_catalog();
    let result = nearby(A, &catalog, 10.0, 5);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, B);
    assert!(distance_km(13.70, 100.50, 20.0, 100.0) > 600.0);
}

#[test]
fn test_focus_publishes_nearby() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    // B is ~7.7 km from A, outside the default 2.5 km radius
    session.handle(UserEvent::Focus { id: A }, &mut adapter);
    assert_eq!(adapter.nearby, vec![(A, Vec::new())]);

    assert!(!session.handle(UserEvent::Focus { id: 99 }, &mut adapter));
    assert_eq!(session.focus(), Some(A));

    session.handle(UserEvent::ClearFocus, &mut adapter);
    assert_eq!(adapter.focus_cleared, 1);
    assert_eq!(session.focus(), None);
}

// ============================================================================
// Locate Me Scenarios
// ============================================================================

#[test]
fn test_locate_reranks_catalog() {
    init_logging();
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    let request = session.begin_locate();
    let resolution =
        session.complete_locate(&request, Ok(GeoPoint::new(19.9, 100.1)), &mut adapter);

    assert!(matches!(resolution, LocateResolution::Located(_)));
    let ranked: Vec<SpotId> = session.ranking().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ranked, vec![C, B, A]);
    assert_eq!(adapter.rankings.len(), 1);
    assert_eq!(session.position(), Some(GeoPoint::new(19.9, 100.1)));
}

#[test]
fn test_stale_locate_ignored() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    let first = session.begin_locate();
    let second = session.begin_locate();

    let near_c = GeoPoint::new(19.9, 100.1);
    let near_a = GeoPoint::new(13.70, 100.49);
    assert_eq!(
        session.complete_locate(&second, Ok(near_a), &mut adapter),
        LocateResolution::Located(near_a)
    );
    assert_eq!(
        session.complete_locate(&first, Ok(near_c), &mut adapter),
        LocateResolution::Stale
    );

    assert_eq!(adapter.rankings.len(), 1);
    assert_eq!(session.ranking().unwrap()[0].id, A);
    assert_eq!(session.position(), Some(near_a));
}

#[test]
fn test_locate_failures_leave_state_alone() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();
    session.toggle_save(B, &mut adapter);
    session.toggle_save(A, &mut adapter);

    let denied = session.begin_locate();
    session.complete_locate(&denied, Err(GeolocationError::Denied), &mut adapter);

    let slow = session.begin_locate();
    let late = slow.issued_at() + Duration::from_secs(30);
    let resolution =
        session.complete_locate_at(&slow, Ok(GeoPoint::new(13.7, 100.5)), late, &mut adapter);

    assert_eq!(
        resolution,
        LocateResolution::Failed(GeolocationError::Timeout)
    );
    assert_eq!(
        adapter.failures,
        vec![GeolocationError::Denied, GeolocationError::Timeout]
    );
    assert!(session.ranking().is_none());
    assert_eq!(session.order(), &[B, A]);
}

#[test]
fn test_locate_in_time_with_explicit_clock() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();

    let request = session.begin_locate();
    let arrived = request.issued_at() + Duration::from_secs(9);
    let resolution =
        session.complete_locate_at(&request, Ok(GeoPoint::new(13.7, 100.5)), arrived, &mut adapter);
    assert!(matches!(resolution, LocateResolution::Located(_)));
}

// ============================================================================
// Snapshot
// ============================================================================

#[test]
fn test_snapshot_reflects_session() {
    let mut session = TravelSession::new(abc_catalog());
    let mut adapter = RecordingAdapter::default();
    session.toggle_save(A, &mut adapter);
    session.toggle_save(B, &mut adapter);
    session.focus_on(B, &mut adapter);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.saved_count, 2);
    assert_eq!(snapshot.order, vec![A, B]);
    assert_eq!(snapshot.route.ids, vec![A, B]);
    assert!((snapshot.route_km - distance_km(13.70, 100.50, 13.75, 100.55)).abs() < 1e-9);
    assert_eq!(snapshot.focus, Some(B));
    assert_eq!(snapshot.visible, vec![A, B, C]);

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json()).unwrap();
    assert_eq!(json["order"], serde_json::json!([1, 2]));
    assert_eq!(json["filter"]["kind"], "all");
}
