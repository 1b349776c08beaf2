//! Evolution inspection snapshot

use serde::{Deserialize, Serialize};

use crate::types::{EvolutionState, EvolutionStep};

/// Resolver state plus the flattened display sequence of a ready tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct EvolutionSnapshot {
    pub state: EvolutionState,
    /// Pre-order steps; empty unless `state` is ready
    pub steps: Vec<EvolutionStep>,
}
