use models::CompetitorMap;
use serde::{Deserialize, Serialize};

/// Undo stack of competitor collections. Pushing is cheap because the maps
/// share unchanged records with the live collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    snapshots: Vec<CompetitorMap>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, competitors: &CompetitorMap) {
        self.snapshots.push(competitors.clone());
    }

    pub fn pop(&mut self) -> Option<CompetitorMap> {
        self.snapshots.pop()
    }

    /// Oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &CompetitorMap> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Ids whose slot for `round` is filled in `live` but empty in `restored`.
pub fn reverted_in_round(restored: &CompetitorMap, live: &CompetitorMap, round: u8) -> Vec<String> {
    live.values()
        .filter(|c| c.has_result(round))
        .filter(|c| restored.get(&c.id).is_some_and(|r| !r.has_result(round)))
        .map(|c| c.id.clone())
        .collect()
}
