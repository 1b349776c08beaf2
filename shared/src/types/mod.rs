//! Core data model shared by the catalog, CLI and web surface

pub mod creature;
pub mod criteria;
pub mod evolution;

pub use creature::{Ability, Creature, PokemonType, StatName, STAT_BAR_MAX};
pub use criteria::{Criteria, Generation, MinStats, SortKey, MAX_STAT_FLOOR};
pub use evolution::{EvolutionNode, EvolutionState, EvolutionStep};
