//! User-selected filter and sort parameters

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use super::creature::{PokemonType, StatName};
use crate::errors::{SharedError, SharedResult};

/// Highest value a minimum-stat floor may take
pub const MAX_STAT_FLOOR: u32 = 150;

/// Inclusive id ranges per generation, ascending and contiguous
const GENERATION_RANGES: [(u32, u32); 9] = [
    (1, 151),
    (152, 251),
    (252, 386),
    (387, 493),
    (494, 649),
    (650, 721),
    (722, 809),
    (810, 905),
    (906, 1025),
];

/// A fixed numeric id-range partition of the catalog (1-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Generation(u8);

impl Generation {
    pub const COUNT: usize = GENERATION_RANGES.len();

    pub fn new(number: u8) -> SharedResult<Self> {
        if (1..=Self::COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SharedError::InvalidGeneration {
                input: number.to_string(),
            })
        }
    }

    pub fn all() -> impl Iterator<Item = Generation> {
        (1..=Self::COUNT as u8).map(Generation)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        let (start, end) = GENERATION_RANGES[usize::from(self.0) - 1];
        start..=end
    }

    pub fn contains(&self, id: u32) -> bool {
        self.range().contains(&id)
    }

    /// Generation whose range holds `id`, if any
    pub fn of(id: u32) -> Option<Generation> {
        Generation::all().find(|generation| generation.contains(id))
    }
}

impl TryFrom<u8> for Generation {
    type Error = SharedError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Generation::new(value)
    }
}

impl From<Generation> for u8 {
    fn from(generation: Generation) -> Self {
        generation.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen {}", self.0)
    }
}

impl std::str::FromStr for Generation {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("gen")
            .or_else(|| trimmed.strip_prefix("Gen"))
            .unwrap_or(trimmed)
            .trim();
        digits
            .parse::<u8>()
            .map_err(|_| SharedError::InvalidGeneration { input: s.to_string() })
            .and_then(Generation::new)
    }
}

/// Ordering applied to the visible subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Hp,
    Attack,
    Total,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Hp,
        SortKey::Attack,
        SortKey::Total,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Hp => "hp",
            SortKey::Attack => "attack",
            SortKey::Total => "total",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == needle)
            .ok_or_else(|| SharedError::UnknownSortKey { input: s.to_string() })
    }
}

/// Per-stat floors for the four gated stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MinStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl MinStats {
    pub fn new(hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            hp: hp.min(MAX_STAT_FLOOR),
            attack: attack.min(MAX_STAT_FLOOR),
            defense: defense.min(MAX_STAT_FLOOR),
            speed: speed.min(MAX_STAT_FLOOR),
        }
    }

    /// Floor for `stat`; ungated stats have none
    pub fn floor(&self, stat: StatName) -> u32 {
        match stat {
            StatName::Hp => self.hp,
            StatName::Attack => self.attack,
            StatName::Defense => self.defense,
            StatName::Speed => self.speed,
            StatName::SpecialAttack | StatName::SpecialDefense => 0,
        }
    }

    /// Set one floor, clamped to `MAX_STAT_FLOOR`; only gated stats have floors
    pub fn set(&mut self, stat: StatName, value: u32) -> SharedResult<()> {
        let value = value.min(MAX_STAT_FLOOR);
        match stat {
            StatName::Hp => self.hp = value,
            StatName::Attack => self.attack = value,
            StatName::Defense => self.defense = value,
            StatName::Speed => self.speed = value,
            StatName::SpecialAttack | StatName::SpecialDefense => {
                return Err(SharedError::UnknownStat {
                    input: stat.to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        StatName::GATED.iter().all(|stat| self.floor(*stat) == 0)
    }
}

/// The full set of user-selected filter and sort parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    pub search_text: String,
    pub selected_types: BTreeSet<PokemonType>,
    pub selected_generations: BTreeSet<Generation>,
    pub min_stats: MinStats,
    pub sort_key: SortKey,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_types: BTreeSet::new(),
            selected_generations: Generation::all().collect(),
            min_stats: MinStats::default(),
            sort_key: SortKey::Id,
        }
    }
}

impl Criteria {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_types(mut self, types: &[PokemonType]) -> Self {
        self.selected_types = types.iter().copied().collect();
        self
    }

    pub fn with_generations(mut self, generations: &[Generation]) -> Self {
        self.selected_generations = generations.iter().copied().collect();
        self
    }

    pub fn with_min_stats(mut self, min_stats: MinStats) -> Self {
        self.min_stats = min_stats;
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Add the type if absent, remove it if present
    pub fn toggle_type(&mut self, pokemon_type: PokemonType) {
        if !self.selected_types.remove(&pokemon_type) {
            self.selected_types.insert(pokemon_type);
        }
    }

    pub fn toggle_generation(&mut self, generation: Generation) {
        if !self.selected_generations.remove(&generation) {
            self.selected_generations.insert(generation);
        }
    }

    pub fn set_min_stat(&mut self, stat: StatName, value: u32) -> SharedResult<()> {
        self.min_stats.set(stat, value)
    }

    /// Reset search, types and floors; sort order and generations stay
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.selected_types.clear();
        self.min_stats = MinStats::default();
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_text.is_empty() || !self.selected_types.is_empty() || !self.min_stats.is_zero()
    }

    /// Generation gating is skipped when none or all generations are selected
    pub fn restricts_generations(&self) -> bool {
        let count = self.selected_generations.len();
        count > 0 && count < Generation::COUNT
    }
}
