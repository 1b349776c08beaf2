//! Sort strategy
//!
//! Every comparator is total; ties are left to the stable sort so records
//! keep their store order.

use std::borrow::Borrow;
use std::cmp::Ordering;

use shared::{Creature, SortKey, StatName};

pub type Comparator = fn(&Creature, &Creature) -> Ordering;

/// Comparator for the selected sort key
pub fn compare_fn(sort_key: SortKey) -> Comparator {
    match sort_key {
        SortKey::Id => by_id,
        SortKey::Name => by_name,
        SortKey::Hp => by_hp_desc,
        SortKey::Attack => by_attack_desc,
        SortKey::Total => by_total_desc,
    }
}

/// Stable in-place sort by `sort_key`
///
/// Name sorting computes each collation key once.
pub fn sort_creatures<T: Borrow<Creature>>(creatures: &mut [T], sort_key: SortKey) {
    match sort_key {
        SortKey::Name => {
            creatures.sort_by_cached_key(|c| collation_key(&<T as Borrow<Creature>>::borrow(c).name))
        }
        _ => {
            let compare = compare_fn(sort_key);
            creatures.sort_by(|a, b| {
                compare(
                    <T as Borrow<Creature>>::borrow(a),
                    <T as Borrow<Creature>>::borrow(b),
                )
            });
        }
    }
}

fn by_id(a: &Creature, b: &Creature) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_name(a: &Creature, b: &Creature) -> Ordering {
    collation_key(&a.name).cmp(&collation_key(&b.name))
}

fn by_hp_desc(a: &Creature, b: &Creature) -> Ordering {
    b.stat(StatName::Hp).cmp(&a.stat(StatName::Hp))
}

fn by_attack_desc(a: &Creature, b: &Creature) -> Ordering {
    b.stat(StatName::Attack).cmp(&a.stat(StatName::Attack))
}

fn by_total_desc(a: &Creature, b: &Creature) -> Ordering {
    b.total_stats().cmp(&a.total_stats())
}

/// Lower-cased name with Latin diacritics folded to their base letter
///
/// Approximates a locale-aware comparison for catalog names ("Flabébé"
/// sorts next to "flabebe", not after "z").
pub fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
