//! Pure reducers over selection set members

use std::collections::BTreeMap;

use shared::{ChartRow, Creature, PokemonType, SelectionSnapshot, StatName};

use super::selection::SelectionSet;

/// Sum of every entry in the stat mapping
pub fn total_stats(creature: &Creature) -> u32 {
    creature.total_stats()
}

/// Rounded per-stat mean over the six canonical stats
///
/// Returns `None` for an empty member list. Halves round up.
pub fn average_stats(members: &[Creature]) -> Option<BTreeMap<StatName, u32>> {
    if members.is_empty() {
        return None;
    }
    let count = members.len() as u64;

    let averages = StatName::ALL
        .iter()
        .map(|stat| {
            let sum: u64 = members.iter().map(|m| u64::from(m.stat(*stat))).sum();
            let rounded = (2 * sum + count) / (2 * count);
            (*stat, rounded as u32)
        })
        .collect();

    Some(averages)
}

/// Occurrences of each type tag across all members' type lists
pub fn type_coverage(members: &[Creature]) -> BTreeMap<PokemonType, usize> {
    let mut coverage = BTreeMap::new();
    for pokemon_type in members.iter().flat_map(|m| m.types.iter()) {
        *coverage.entry(*pokemon_type).or_insert(0) += 1;
    }
    coverage
}

/// Wide-format chart data: one row per canonical stat, one column per member name
pub fn chart_rows(members: &[Creature]) -> Vec<ChartRow> {
    if members.is_empty() {
        return Vec::new();
    }

    StatName::ALL
        .iter()
        .map(|stat| ChartRow {
            stat: stat.label(),
            values: members
                .iter()
                .map(|member| (member.name.clone(), member.stat(*stat)))
                .collect(),
        })
        .collect()
}

/// Snapshot of a selection set with all aggregates attached
pub fn snapshot(set: &SelectionSet) -> SelectionSnapshot {
    let members = set.members();
    SelectionSnapshot {
        kind: set.kind(),
        capacity: set.capacity(),
        members: members.to_vec(),
        totals: members.iter().map(|m| (m.id, total_stats(m))).collect(),
        averages: average_stats(members),
        type_coverage: type_coverage(members),
        chart_rows: chart_rows(members),
    }
}
