//! Evolution trees as shown to the UI

use serde::{Deserialize, Serialize};

use super::creature::PokemonType;

/// A resolved node of an evolution tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species_id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub types: Vec<PokemonType>,
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn leaf(species_id: u32, name: impl Into<String>) -> Self {
        Self {
            species_id,
            name: name.into(),
            sprite_url: None,
            types: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<EvolutionNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in the tree rooted here
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(EvolutionNode::node_count).sum::<usize>()
    }

    pub fn is_branching(&self) -> bool {
        self.children.len() > 1 || self.children.iter().any(EvolutionNode::is_branching)
    }
}

/// One entry of the flattened, pre-order display sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStep {
    pub species_id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub types: Vec<PokemonType>,
    /// Distance from the root (root is 0)
    pub depth: usize,
    /// Position among the parent's children, in source order
    pub sibling_index: usize,
    /// Species id of the parent node, `None` for the root
    pub parent_id: Option<u32>,
    /// A separator goes between this step and the next one
    pub separator_after: bool,
}

/// Resolution state of the creature currently being inspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvolutionState {
    Idle,
    Loading {
        creature_id: u32,
    },
    Ready {
        creature_id: u32,
        tree: EvolutionNode,
    },
    Failed {
        creature_id: u32,
        reason: String,
    },
}

impl EvolutionState {
    pub fn creature_id(&self) -> Option<u32> {
        match self {
            EvolutionState::Idle => None,
            EvolutionState::Loading { creature_id }
            | EvolutionState::Ready { creature_id, .. }
            | EvolutionState::Failed { creature_id, .. } => Some(*creature_id),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, EvolutionState::Ready { .. } | EvolutionState::Failed { .. })
    }

    pub fn tree(&self) -> Option<&EvolutionNode> {
        match self {
            EvolutionState::Ready { tree, .. } => Some(tree),
            _ => None,
        }
    }
}

impl Default for EvolutionState {
    fn default() -> Self {
        EvolutionState::Idle
    }
}
