//! # Itinerary
//!
//! User-controlled visiting order over the saved-spot set.
//!
//! [`ItineraryOrder`] is the bare ordered sequence with the reorder commands.
//! [`Itinerary`] pairs it with a [`SavedSet`] and is the type callers should
//! mutate: every operation leaves the order holding exactly the saved ids,
//! each once. Operations that would break that are ignored.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::membership::SavedSet;
use crate::SpotId;

/// Direction for an adjacent swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the start of the itinerary (-1)
    Up,
    /// Towards the end of the itinerary (+1)
    Down,
}

impl Direction {
    /// Map a signed step to a direction: negative is up, positive is down.
    pub fn from_step(step: i32) -> Option<Self> {
        match step.signum() {
            -1 => Some(Direction::Up),
            1 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Ordered sequence of saved spot ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryOrder {
    ids: Vec<SpotId>,
}

impl ItineraryOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly saved id. Ignored if the id is already present.
    pub fn on_added(&mut self, id: SpotId) -> bool {
        if self.ids.contains(&id) {
            debug!("[itinerary] Ignoring add of {}: already ordered", id);
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Drop an unsaved id from wherever it sits. Ignored if absent.
    pub fn on_removed(&mut self, id: SpotId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.ids.remove(idx);
                true
            }
            None => {
                debug!("[itinerary] Ignoring removal of {}: not ordered", id);
                false
            }
        }
    }

    /// Swap `id` with its neighbour in `direction`.
    ///
    /// No-op when `id` is absent or already at that end.
    pub fn move_adjacent(&mut self, id: SpotId, direction: Direction) -> bool {
        let Some(idx) = self.index_of(id) else {
            debug!("[itinerary] Ignoring move of {}: not ordered", id);
            return false;
        };
        let neighbour = match direction {
            Direction::Up if idx > 0 => idx - 1,
            Direction::Down if idx + 1 < self.ids.len() => idx + 1,
            _ => return false,
        };
        self.ids.swap(idx, neighbour);
        true
    }

    /// Move `id` to sit immediately before `target_id` (drop semantics).
    ///
    /// The target position is looked up after `id` has been taken out, so
    /// dragging an item downwards lands it just above the drop target.
    /// No-op when the ids are equal or either one is absent.
    pub fn move_to(&mut self, id: SpotId, target_id: SpotId) -> bool {
        if id == target_id {
            return false;
        }
        let (Some(from), true) = (self.index_of(id), self.ids.contains(&target_id)) else {
            debug!(
                "[itinerary] Ignoring move of {} onto {}: not ordered",
                id, target_id
            );
            return false;
        };

        let moved = self.ids.remove(from);
        // Present by the check above, and removing `id` cannot remove it
        let to = self.index_of(target_id).unwrap_or(self.ids.len());
        self.ids.insert(to, moved);
        to != from
    }

    /// Read-only view of the order.
    pub fn order(&self) -> &[SpotId] {
        &self.ids
    }

    pub fn contains(&self, id: SpotId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    fn index_of(&self, id: SpotId) -> Option<usize> {
        self.ids.iter().position(|&x| x == id)
    }
}

/// Saved set and visiting order, kept in lockstep.
#[derive(Debug, Clone, Default)]
pub struct Itinerary {
    saved: SavedSet,
    order: ItineraryOrder,
}

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save or unsave a spot.
    ///
    /// Saving appends to the end of the order; unsaving removes it.
    /// Returns `true` when the spot is saved after the call.
    pub fn toggle(&mut self, id: SpotId) -> bool {
        let saved = self.saved.toggle(id);
        if saved {
            self.order.on_added(id);
        } else {
            self.order.on_removed(id);
        }
        debug_assert_eq!(self.saved.size(), self.order.len());
        saved
    }

    /// Swap a saved spot with its neighbour. See [`ItineraryOrder::move_adjacent`].
    pub fn move_adjacent(&mut self, id: SpotId, direction: Direction) -> bool {
        if !self.saved.contains(id) {
            return false;
        }
        self.order.move_adjacent(id, direction)
    }

    /// Drop a saved spot before another. See [`ItineraryOrder::move_to`].
    pub fn move_to(&mut self, id: SpotId, target_id: SpotId) -> bool {
        if !self.saved.contains(id) || !self.saved.contains(target_id) {
            return false;
        }
        self.order.move_to(id, target_id)
    }

    pub fn order(&self) -> &[SpotId] {
        self.order.order()
    }

    pub fn saved(&self) -> &SavedSet {
        &self.saved
    }

    pub fn contains(&self, id: SpotId) -> bool {
        self.saved.contains(id)
    }

    /// Number of saved spots.
    pub fn len(&self) -> usize {
        self.saved.size()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Unsave everything.
    pub fn clear(&mut self) {
        self.saved.clear();
        self.order.clear();
    }
}
