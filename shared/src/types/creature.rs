//! Creature records and the closed tag sets they are built from

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::SharedError;

/// Upper bound used when rendering a stat as a bar
pub const STAT_BAR_MAX: u32 = 255;

/// The 18 known type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
        PokemonType::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PokemonType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PokemonType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| SharedError::UnknownType { input: s.to_string() })
    }
}

/// The six canonical base stats, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatName {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatName {
    pub const ALL: [StatName; 6] = [
        StatName::Hp,
        StatName::Attack,
        StatName::Defense,
        StatName::SpecialAttack,
        StatName::SpecialDefense,
        StatName::Speed,
    ];

    /// Stats that carry a minimum-value filter
    pub const GATED: [StatName; 4] = [
        StatName::Hp,
        StatName::Attack,
        StatName::Defense,
        StatName::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatName::Hp => "hp",
            StatName::Attack => "attack",
            StatName::Defense => "defense",
            StatName::SpecialAttack => "special-attack",
            StatName::SpecialDefense => "special-defense",
            StatName::Speed => "speed",
        }
    }

    /// Upper-case label with hyphens turned into spaces ("SPECIAL ATTACK")
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ").to_uppercase()
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StatName {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace([' ', '_'], "-");
        StatName::ALL
            .iter()
            .copied()
            .find(|stat| stat.as_str() == needle)
            .ok_or_else(|| SharedError::UnknownStat { input: s.to_string() })
    }
}

/// One entry of a creature's ability list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

impl Ability {
    pub fn new(name: impl Into<String>, is_hidden: bool) -> Self {
        Self {
            name: name.into(),
            is_hidden,
        }
    }

    pub fn display_name(&self) -> String {
        self.name.replace('-', " ")
    }
}

/// A single catalog record, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub stats: BTreeMap<StatName, u32>,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub abilities: Vec<Ability>,
    pub sprite_url: Option<String>,
    pub moves_count: u32,
    pub base_experience: Option<u32>,
}

impl Creature {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: Vec::new(),
            stats: BTreeMap::new(),
            height: 0,
            weight: 0,
            abilities: Vec::new(),
            sprite_url: None,
            moves_count: 0,
            base_experience: None,
        }
    }

    pub fn with_types(mut self, types: &[PokemonType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn with_stat(mut self, stat: StatName, value: u32) -> Self {
        self.stats.insert(stat, value);
        self
    }

    /// Set all six stats in canonical order
    pub fn with_stats(mut self, values: [u32; 6]) -> Self {
        for (stat, value) in StatName::ALL.iter().zip(values) {
            self.stats.insert(*stat, value);
        }
        self
    }

    pub fn with_sprite(mut self, url: impl Into<String>) -> Self {
        self.sprite_url = Some(url.into());
        self
    }

    /// Base value of a stat; absent stats count as 0
    pub fn stat(&self, stat: StatName) -> u32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }

    pub fn total_stats(&self) -> u32 {
        self.stats.values().sum()
    }

    /// Catalog number padded to three digits, e.g. `#025`
    pub fn dex_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Width of a stat bar in percent, capped at 100
    pub fn stat_bar_percent(&self, stat: StatName) -> f64 {
        (f64::from(self.stat(stat)) / f64::from(STAT_BAR_MAX) * 100.0).min(100.0)
    }

    pub fn has_sprite(&self) -> bool {
        self.sprite_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parsing_is_case_insensitive() {
        assert_eq!("Fire".parse::<PokemonType>().unwrap(), PokemonType::Fire);
        assert_eq!(" fairy ".parse::<PokemonType>().unwrap(), PokemonType::Fairy);
        assert!(matches!(
            "shadow".parse::<PokemonType>(),
            Err(SharedError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_stat_names_serialize_kebab_case() {
        let json = serde_json::to_string(&StatName::SpecialDefense).unwrap();
        assert_eq!(json, "\"special-defense\"");
        assert_eq!("special attack".parse::<StatName>().unwrap(), StatName::SpecialAttack);
        assert_eq!(StatName::SpecialAttack.label(), "SPECIAL ATTACK");
    }

    #[test]
    fn test_missing_stat_counts_as_zero() {
        let creature = Creature::new(1, "bulbasaur").with_stat(StatName::Hp, 45);
        assert_eq!(creature.stat(StatName::Hp), 45);
        assert_eq!(creature.stat(StatName::Speed), 0);
        assert_eq!(creature.total_stats(), 45);
    }

    #[test]
    fn test_display_helpers() {
        let mut creature = Creature::new(25, "pikachu").with_stats([35, 55, 40, 50, 50, 90]);
        creature.height = 4;
        creature.weight = 60;

        assert_eq!(creature.dex_number(), "#025");
        assert_eq!(creature.height_m(), 0.4);
        assert_eq!(creature.weight_kg(), 6.0);
        assert_eq!(creature.total_stats(), 320);
        assert!(!creature.has_sprite());

        let capped = Creature::new(242, "blissey").with_stat(StatName::Hp, 255);
        assert_eq!(capped.stat_bar_percent(StatName::Hp), 100.0);
        assert_eq!(Ability::new("lightning-rod", true).display_name(), "lightning rod");
    }
}
