//! Chart data derived from the catalog.
//!
//! - category counts for the doughnut chart
//! - energy/price bubble points for the vibe chart

use serde::{Deserialize, Serialize};

use crate::catalog::SpotCatalog;
use crate::{Category, SpotId};

/// Bubble radius for must-do spots.
const MUST_DO_RADIUS: f64 = 10.0;
/// Bubble radius for everything else.
const DEFAULT_RADIUS: f64 = 7.0;

/// Number of spots in a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    pub color: String,
}

/// One bubble on the vibe chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibePoint {
    pub spot_id: SpotId,
    /// Energy (chaos score)
    pub x: f64,
    /// Price (cost score)
    pub y: f64,
    pub r: f64,
    pub category: Category,
}

/// Spots per category, in order of first appearance in the catalog.
pub fn category_counts(catalog: &SpotCatalog) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for spot in catalog.spots() {
        match counts.iter_mut().find(|c| c.category == spot.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: spot.category.clone(),
                count: 1,
                color: spot.category.color_hex().to_string(),
            }),
        }
    }
    counts
}

/// Vibe chart points in catalog order.
pub fn vibe_points(catalog: &SpotCatalog) -> Vec<VibePoint> {
    catalog
        .spots()
        .iter()
        .map(|spot| VibePoint {
            spot_id: spot.id,
            x: spot.chaos_score,
            y: spot.cost_score,
            r: if spot.must_do {
                MUST_DO_RADIUS
            } else {
                DEFAULT_RADIUS
            },
            category: spot.category.clone(),
        })
        .collect()
}
