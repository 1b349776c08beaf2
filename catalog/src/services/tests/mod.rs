//! Service-specific tests
//!
//! Each service has its own test file; shared builders live in `common`.


pub mod common {
    use shared::{Creature, PokemonType};

    use crate::types::{DetailRef, EvolutionLink, IdentityRef, SpeciesDescriptor};

    pub fn creature(id: u32, name: &str, types: &[PokemonType]) -> Creature {
        Creature::new(id, name)
            .with_types(types)
            .with_stats([50, 50, 50, 50, 50, 50])
            .with_sprite(format!("https://img.example/{id}.png"))
    }

    pub fn identity(id: u32, name: &str) -> IdentityRef {
        IdentityRef {
            id,
            name: name.to_string(),
            detail: DetailRef::new(format!("https://pokeapi.example/api/v2/pokemon/{id}/")),
        }
    }

    pub fn species(id: u32, chain_id: u32) -> SpeciesDescriptor {
        SpeciesDescriptor {
            id,
            name: format!("species-{id}"),
            evolution_chain: DetailRef::new(format!(
                "https://pokeapi.example/api/v2/evolution-chain/{chain_id}/"
            )),
        }
    }

    /// Bulbasaur -> Ivysaur -> Venusaur
    pub fn linear_chain() -> EvolutionLink {
        EvolutionLink::new(1, "bulbasaur").evolves_to(vec![
            EvolutionLink::new(2, "ivysaur").evolves_to(vec![EvolutionLink::new(3, "venusaur")]),
        ])
    }

    /// Oddish -> Gloom -> {Vileplume, Bellossom}
    pub fn branching_chain() -> EvolutionLink {
        EvolutionLink::new(43, "oddish").evolves_to(vec![EvolutionLink::new(44, "gloom")
            .evolves_to(vec![
                EvolutionLink::new(45, "vileplume"),
                EvolutionLink::new(182, "bellossom"),
            ])])
    }
}
