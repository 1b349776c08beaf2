//! Predicate composer
//!
//! Turns a `Criteria` value into a single filter over creatures. Each clause
//! is a plain function so it can be tested on its own; `build` ANDs them.

use std::collections::BTreeSet;

use shared::{Creature, Criteria, Generation, MinStats, PokemonType, StatName};

/// A composed, side-effect free creature filter
pub type Predicate = Box<dyn Fn(&Creature) -> bool + Send + Sync>;

/// Compose all clauses of `criteria` into one predicate
pub fn build(criteria: &Criteria) -> Predicate {
    let search = criteria.search_text.clone();
    let needle = search.to_lowercase();
    let types = criteria.selected_types.clone();
    let generations = criteria
        .restricts_generations()
        .then(|| criteria.selected_generations.clone());
    let floors = criteria.min_stats;

    Box::new(move |creature: &Creature| {
        generations
            .as_ref()
            .map_or(true, |selected| matches_generation(creature, selected))
            && matches_search(creature, &search, &needle)
            && matches_types(creature, &types)
            && meets_floors(creature, &floors)
    })
}

/// True when the id lies in at least one selected generation's range
///
/// Callers skip this clause when zero or all generations are selected.
pub fn matches_generation(creature: &Creature, selected: &BTreeSet<Generation>) -> bool {
    selected.iter().any(|generation| generation.contains(creature.id))
}

/// Case-insensitive name substring, or the raw text inside the decimal id
///
/// `needle` is `search` already lower-cased.
pub fn matches_search(creature: &Creature, search: &str, needle: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    creature.name.to_lowercase().contains(needle) || creature.id.to_string().contains(search)
}

/// True if no types are selected or the creature carries any selected type
pub fn matches_types(creature: &Creature, selected: &BTreeSet<PokemonType>) -> bool {
    selected.is_empty() || creature.types.iter().any(|t| selected.contains(t))
}

/// Every gated stat must reach its floor; missing stats count as 0
pub fn meets_floors(creature: &Creature, floors: &MinStats) -> bool {
    StatName::GATED
        .iter()
        .all(|stat| creature.stat(*stat) >= floors.floor(*stat))
}
