//! Geographic utilities: great-circle distance, bounds and search boxes.

use crate::{Bounds, GeoPoint};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude on a sphere of [`EARTH_RADIUS_KM`].
const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Haversine great-circle distance in kilometres between two coordinates.
///
/// Symmetric and zero for identical coordinates. Inputs are expected to be
/// valid latitudes/longitudes in degrees; nothing is clamped.
///
/// # Example
/// ```
/// use spot_itinerary::distance_km;
/// let d = distance_km(13.70, 100.50, 13.75, 100.55);
/// assert!(d > 7.0 && d < 8.0);
/// ```
pub fn distance_km(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lng_b - lng_a).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Haversine distance in kilometres between two points.
#[inline]
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    distance_km(a.lat, a.lng, b.lat, b.lng)
}

/// Total length in kilometres along a polyline.
pub fn polyline_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(&pair[0], &pair[1]))
        .sum()
}

/// Compute the bounding box of a set of points.
///
/// Returns `None` for an empty slice.
pub fn compute_bounds(points: &[GeoPoint]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
    }

    Some(Bounds {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
    })
}

/// Degree-space box guaranteed to contain every point within `radius_km` of
/// `center`.
///
/// Returns `None` when no such box exists without wrapping (near the poles or
/// across the antimeridian); callers should fall back to a full scan.
pub fn search_box(center: &GeoPoint, radius_km: f64) -> Option<Bounds> {
    // 10% slack keeps the box conservative against spherical distortion
    let d_lat = radius_km / KM_PER_DEGREE * 1.1;
    let max_abs_lat = center.lat.abs() + d_lat;
    if max_abs_lat >= 89.0 {
        return None;
    }
    let d_lng = d_lat / max_abs_lat.to_radians().cos();

    let bounds = Bounds {
        min_lat: center.lat - d_lat,
        max_lat: center.lat + d_lat,
        min_lng: center.lng - d_lng,
        max_lng: center.lng + d_lng,
    };
    if bounds.min_lng < -180.0 || bounds.max_lng > 180.0 {
        return None;
    }
    Some(bounds)
}
