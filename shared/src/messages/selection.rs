//! Selection set snapshots and their aggregates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Creature, PokemonType, StatName};

/// Which of the two bounded selection sets a snapshot describes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Comparison,
    Team,
}

impl SelectionKind {
    pub fn capacity(&self) -> usize {
        match self {
            SelectionKind::Comparison => 3,
            SelectionKind::Team => 6,
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Comparison => write!(f, "comparison"),
            SelectionKind::Team => write!(f, "team"),
        }
    }
}

/// One category of the comparison chart: a stat label plus one value per member
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChartRow {
    pub stat: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, u32>,
}

/// Members of a selection set plus everything derived from them
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelectionSnapshot {
    pub kind: SelectionKind,
    pub capacity: usize,
    pub members: Vec<Creature>,
    /// Total base stats per member id
    pub totals: BTreeMap<u32, u32>,
    /// `None` when the set is empty
    pub averages: Option<BTreeMap<StatName, u32>>,
    pub type_coverage: BTreeMap<PokemonType, usize>,
    pub chart_rows: Vec<ChartRow>,
}
