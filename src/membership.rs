//! Saved-spot membership set.
//!
//! Tracks which spots are saved, independent of visiting order. Ids are not
//! checked against the catalog here.

use std::collections::HashSet;

use crate::SpotId;

/// Set of saved spot ids.
#[derive(Debug, Clone, Default)]
pub struct SavedSet {
    ids: HashSet<SpotId>,
}

impl SavedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    ///
    /// Returns `true` when the id is saved after the call.
    pub fn toggle(&mut self, id: SpotId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: SpotId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of saved spots.
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Iterate saved ids in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = SpotId> + '_ {
        self.ids.iter().copied()
    }
}
