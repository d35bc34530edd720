//! # Spot Catalog
//!
//! The immutable list of spots loaded once at session start. Catalog order is
//! preserved everywhere it matters (card rendering, tie-breaking of equal
//! distances). Lookups by id go through a hash index and proximity queries
//! through an R-tree over spot coordinates.

use std::collections::HashMap;

use log::info;
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpotError};
use crate::geo_utils::compute_bounds;
use crate::membership::SavedSet;
use crate::{Bounds, Category, GeoPoint, Spot, SpotId};

/// A spot position with its catalog index for R-tree queries.
#[derive(Debug, Clone, Copy)]
pub struct IndexedSpot {
    pub idx: usize,
    pub lat: f64,
    pub lng: f64,
}

impl RTreeObject for IndexedSpot {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lng, self.lat])
    }
}

/// Which spots the card grid shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "category")]
pub enum CardFilter {
    #[default]
    All,
    Category(Category),
    Saved,
}

/// Validated, indexed collection of spots.
#[derive(Debug)]
pub struct SpotCatalog {
    spots: Vec<Spot>,
    index: HashMap<SpotId, usize>,
    spatial_index: RTree<IndexedSpot>,
}

impl SpotCatalog {
    /// Build a catalog from spot records.
    ///
    /// Fails on duplicate ids or coordinates outside the valid range.
    pub fn from_spots(spots: Vec<Spot>) -> Result<Self> {
        let mut index = HashMap::with_capacity(spots.len());
        for (idx, spot) in spots.iter().enumerate() {
            if !spot.point().is_valid() {
                return Err(SpotError::InvalidCoordinates {
                    id: spot.id,
                    lat: spot.lat,
                    lng: spot.lng,
                });
            }
            if index.insert(spot.id, idx).is_some() {
                return Err(SpotError::DuplicateSpot { id: spot.id });
            }
        }

        let indexed: Vec<IndexedSpot> = spots
            .iter()
            .enumerate()
            .map(|(idx, s)| IndexedSpot {
                idx,
                lat: s.lat,
                lng: s.lng,
            })
            .collect();
        let spatial_index = RTree::bulk_load(indexed);

        info!("[catalog] Loaded {} spots", spots.len());

        Ok(Self {
            spots,
            index,
            spatial_index,
        })
    }

    /// Parse a JSON array of spot records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let spots: Vec<Spot> = serde_json::from_str(json)?;
        Self::from_spots(spots)
    }

    /// All spots in catalog order.
    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn get(&self, id: SpotId) -> Option<&Spot> {
        self.index.get(&id).map(|&idx| &self.spots[idx])
    }

    pub fn contains(&self, id: SpotId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of a spot in catalog order.
    pub fn position(&self, id: SpotId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn point(&self, id: SpotId) -> Option<GeoPoint> {
        self.get(id).map(Spot::point)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Bounding box of every spot, for the initial map view.
    pub fn bounds(&self) -> Option<Bounds> {
        let points: Vec<GeoPoint> = self.spots.iter().map(Spot::point).collect();
        compute_bounds(&points)
    }

    /// Catalog indices of spots inside a degree-space box.
    ///
    /// The returned indices are in no particular order.
    pub fn indices_within(&self, bounds: &Bounds) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [bounds.min_lng, bounds.min_lat],
            [bounds.max_lng, bounds.max_lat],
        );
        self.spatial_index
            .locate_in_envelope_intersecting(&envelope)
            .map(|s| s.idx)
            .collect()
    }

    /// Spots shown under a card filter, in catalog order.
    pub fn visible_spots<'a>(&'a self, filter: &CardFilter, saved: &SavedSet) -> Vec<&'a Spot> {
        self.spots
            .iter()
            .filter(|spot| match filter {
                CardFilter::All => true,
                CardFilter::Category(category) => &spot.category == category,
                CardFilter::Saved => saved.contains(spot.id),
            })
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for spot in &self.spots {
            if !seen.contains(&&spot.category) {
                seen.push(&spot.category);
            }
        }
        seen
    }
}
