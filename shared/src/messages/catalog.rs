//! Catalog snapshots handed to the UI layer

use serde::{Deserialize, Serialize};

use crate::types::{Creature, Criteria};

/// Lifecycle of the initial dataset load
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Ready {
        count: usize,
        failed: usize,
    },
    Failed {
        message: String,
    },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready { .. })
    }
}

/// The visible subset together with the criteria that produced it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogSnapshot {
    pub load_state: LoadState,
    /// Records in the store
    pub total: usize,
    pub visible_count: usize,
    /// Monotone counter of completed recomputations
    pub revision: u64,
    /// Criteria the creatures were computed with; edits still inside the
    /// debounce window show up only once their recompute publishes
    pub criteria: Criteria,
    pub creatures: Vec<Creature>,
}
