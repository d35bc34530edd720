//! # Route Deriver
//!
//! Everything derived from the itinerary and catalog coordinates:
//! - the route path drawn through saved spots in visiting order
//! - the nearby list for a focused spot
//! - the "locate me" distance ranking of the whole catalog
//!
//! Nothing here is cached; results are recomputed on demand.

use geo::{BoundingRect, Coord, LineString};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::SpotCatalog;
use crate::geo_utils::{haversine_km, polyline_length_km, search_box};
use crate::{Bounds, GeoPoint, SpotId};

/// Configuration for nearby-spot search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NearbyConfig {
    /// Search radius in kilometres, inclusive.
    /// Default: 2.5 km (roughly 15 minutes on foot or by bike)
    pub radius_km: f64,

    /// Maximum number of results.
    /// Default: 5
    pub limit: usize,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            radius_km: 2.5,
            limit: 5,
        }
    }
}

/// A spot near the focused one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySpot {
    pub id: SpotId,
    pub distance_km: f64,
}

/// A catalog spot annotated with its distance from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSpot {
    pub id: SpotId,
    pub distance_km: f64,
}

/// Ordered coordinates through the saved spots.
///
/// Empty unless at least two stops resolve to coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePath {
    /// Stop ids, parallel to `points`
    pub ids: Vec<SpotId>,
    pub points: Vec<GeoPoint>,
}

impl RoutePath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-line length of the whole route in kilometres.
    pub fn total_km(&self) -> f64 {
        polyline_length_km(&self.points)
    }

    /// Distance of each leg (stop i to stop i+1) in kilometres.
    pub fn legs_km(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|pair| haversine_km(&pair[0], &pair[1]))
            .collect()
    }

    /// Route as a geo line string (x = longitude, y = latitude).
    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(
            self.points
                .iter()
                .map(|p| Coord { x: p.lng, y: p.lat })
                .collect(),
        )
    }

    /// Bounding box to fit the map view to, if the route is non-empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let rect = self.to_line_string().bounding_rect()?;
        Some(Bounds {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        })
    }
}

/// Build the route path for an itinerary order.
///
/// Each id is mapped through the catalog to its coordinates. Ids missing from
/// the catalog are skipped. A route needs two points, so fewer than two
/// resolvable stops yields an empty path.
///
/// # Example
/// ```
/// use spot_itinerary::{build_path, Category, GeoPoint, Spot, SpotCatalog};
///
/// let catalog = SpotCatalog::from_spots(vec![
///     Spot::new(1, "A", Category::Food, 13.70, 100.50),
///     Spot::new(2, "B", Category::Food, 13.75, 100.55),
/// ])
/// .unwrap();
///
/// assert!(build_path(&[1], &catalog).is_empty());
/// let path = build_path(&[2, 1], &catalog);
/// assert_eq!(path.points, vec![GeoPoint::new(13.75, 100.55), GeoPoint::new(13.70, 100.50)]);
/// ```
pub fn build_path(ordered_ids: &[SpotId], catalog: &SpotCatalog) -> RoutePath {
    if ordered_ids.len() < 2 {
        return RoutePath::default();
    }

    let mut path = RoutePath {
        ids: Vec::with_capacity(ordered_ids.len()),
        points: Vec::with_capacity(ordered_ids.len()),
    };
    for &id in ordered_ids {
        match catalog.point(id) {
            Some(point) => {
                path.ids.push(id);
                path.points.push(point);
            }
            None => debug!("[route] Skipping unknown spot {} in path", id),
        }
    }

    if path.points.len() < 2 {
        return RoutePath::default();
    }
    path
}

/// Other spots within `radius_km` of `focus_id`, nearest first, at most `limit`.
///
/// The focus itself is never included. Equal distances keep catalog order.
/// An unknown focus, a zero limit or a negative/NaN radius yields nothing.
pub fn nearby(
    focus_id: SpotId,
    catalog: &SpotCatalog,
    radius_km: f64,
    limit: usize,
) -> Vec<NearbySpot> {
    if limit == 0 || radius_km.is_nan() || radius_km < 0.0 {
        return Vec::new();
    }
    let Some(focus_idx) = catalog.position(focus_id) else {
        debug!("[route] Nearby query for unknown spot {}", focus_id);
        return Vec::new();
    };

    let spots = catalog.spots();
    let origin = spots[focus_idx].point();

    // R-tree narrows candidates to a conservative box; haversine decides
    let candidates: Vec<usize> = match search_box(&origin, radius_km) {
        Some(bounds) => catalog.indices_within(&bounds),
        None => (0..spots.len()).collect(),
    };

    let mut found: Vec<(usize, f64)> = candidates
        .into_iter()
        .filter(|&idx| idx != focus_idx)
        .map(|idx| (idx, haversine_km(&origin, &spots[idx].point())))
        .filter(|&(_, distance)| distance <= radius_km)
        .collect();

    found.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    found.truncate(limit);

    found
        .into_iter()
        .map(|(idx, distance_km)| NearbySpot {
            id: spots[idx].id,
            distance_km,
        })
        .collect()
}

/// [`nearby`] with radius and limit taken from a config.
pub fn nearby_with_config(
    focus_id: SpotId,
    catalog: &SpotCatalog,
    config: &NearbyConfig,
) -> Vec<NearbySpot> {
    nearby(focus_id, catalog, config.radius_km, config.limit)
}

/// Every catalog spot with its distance from an origin, nearest first.
///
/// The sort is stable: spots at equal distance keep catalog order.
pub fn sort_by_distance_from(
    origin_lat: f64,
    origin_lng: f64,
    catalog: &SpotCatalog,
) -> Vec<RankedSpot> {
    let origin = GeoPoint::new(origin_lat, origin_lng);
    let mut ranked: Vec<RankedSpot> = catalog
        .spots()
        .iter()
        .map(|spot| RankedSpot {
            id: spot.id,
            distance_km: haversine_km(&origin, &spot.point()),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
