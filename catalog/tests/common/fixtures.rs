//! Test fixtures and an in-memory creature source
//!
//! The fixture catalog holds a few well-known evolution lines so the
//! resolver can be exercised without a network.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use catalog::{
    CatalogError, CatalogResult, CreatureSource, DetailRef, EvolutionLink, IdentityRef,
    SpeciesDescriptor,
};
use shared::{Creature, PokemonType};

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    pub const BULBASAUR: u32 = 1;
    pub const IVYSAUR: u32 = 2;
    pub const VENUSAUR: u32 = 3;
    pub const CHARMANDER: u32 = 4;
    pub const SQUIRTLE: u32 = 7;
    pub const PIKACHU: u32 = 25;
    pub const ODDISH: u32 = 43;
    pub const GLOOM: u32 = 44;
    pub const VILEPLUME: u32 = 45;
    pub const TAUROS: u32 = 128;
    pub const EEVEE: u32 = 133;
    pub const BELLOSSOM: u32 = 182;
    pub const CHIKORITA: u32 = 152;

    pub fn creatures() -> Vec<Creature> {
        use PokemonType::*;
        vec![
            Self::creature(1, "bulbasaur", &[Grass, Poison], [45, 49, 49, 65, 65, 45]),
            Self::creature(2, "ivysaur", &[Grass, Poison], [60, 62, 63, 80, 80, 60]),
            Self::creature(3, "venusaur", &[Grass, Poison], [80, 82, 83, 100, 100, 80]),
            Self::creature(4, "charmander", &[Fire], [39, 52, 43, 60, 50, 65]),
            Self::creature(7, "squirtle", &[Water], [44, 48, 65, 50, 64, 43]),
            Self::creature(25, "pikachu", &[Electric], [35, 55, 40, 50, 50, 90]),
            Self::creature(43, "oddish", &[Grass, Poison], [45, 50, 55, 75, 65, 30]),
            Self::creature(44, "gloom", &[Grass, Poison], [60, 65, 70, 85, 75, 40]),
            Self::creature(45, "vileplume", &[Grass, Poison], [75, 80, 85, 110, 90, 50]),
            Self::creature(128, "tauros", &[Normal], [75, 100, 95, 40, 70, 110]),
            Self::creature(133, "eevee", &[Normal], [55, 55, 50, 45, 65, 55]),
            Self::creature(134, "vaporeon", &[Water], [130, 65, 60, 110, 95, 65]),
            Self::creature(135, "jolteon", &[Electric], [65, 65, 60, 110, 95, 130]),
            Self::creature(136, "flareon", &[Fire], [65, 130, 60, 95, 110, 65]),
            Self::creature(152, "chikorita", &[Grass], [45, 49, 65, 49, 65, 45]),
            Self::creature(182, "bellossom", &[Grass], [75, 80, 95, 90, 100, 50]),
        ]
    }

    pub fn creature(id: u32, name: &str, types: &[PokemonType], stats: [u32; 6]) -> Creature {
        Creature::new(id, name)
            .with_types(types)
            .with_stats(stats)
            .with_sprite(format!("https://img.example/artwork/{id}.png"))
    }

    /// Evolution chains keyed by chain id, with the species that belong to each
    pub fn chains() -> Vec<(u32, EvolutionLink)> {
        vec![
            (
                1,
                EvolutionLink::new(1, "bulbasaur").evolves_to(vec![EvolutionLink::new(2, "ivysaur")
                    .evolves_to(vec![EvolutionLink::new(3, "venusaur")])]),
            ),
            (
                18,
                EvolutionLink::new(43, "oddish").evolves_to(vec![EvolutionLink::new(44, "gloom")
                    .evolves_to(vec![
                        EvolutionLink::new(45, "vileplume"),
                        EvolutionLink::new(182, "bellossom"),
                    ])]),
            ),
            (
                67,
                EvolutionLink::new(133, "eevee").evolves_to(vec![
                    EvolutionLink::new(134, "vaporeon"),
                    EvolutionLink::new(135, "jolteon"),
                    EvolutionLink::new(136, "flareon"),
                ]),
            ),
            (59, EvolutionLink::new(128, "tauros")),
        ]
    }
}

/// In-memory `CreatureSource` over the fixture catalog
pub struct FixtureSource {
    creatures: HashMap<u32, Creature>,
    order: Vec<u32>,
    chains: HashMap<u32, EvolutionLink>,
    species_chain: HashMap<u32, u32>,
    failing: Mutex<HashSet<u32>>,
    listing_down: AtomicBool,
    listing_calls: AtomicUsize,
    /// Delay and id subset applied to the next listing only
    slow_listing: Mutex<Option<(Duration, Vec<u32>)>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        let creatures = TestFixtures::creatures();
        let order = creatures.iter().map(|c| c.id).collect();
        let mut species_chain = HashMap::new();
        let mut chains = HashMap::new();
        for (chain_id, root) in TestFixtures::chains() {
            collect_species(&root, chain_id, &mut species_chain);
            chains.insert(chain_id, root);
        }

        Self {
            creatures: creatures.into_iter().map(|c| (c.id, c)).collect(),
            order,
            chains,
            species_chain,
            failing: Mutex::new(HashSet::new()),
            listing_down: AtomicBool::new(false),
            listing_calls: AtomicUsize::new(0),
            slow_listing: Mutex::new(None),
        }
    }

    /// Make every detail fetch of `id` fail
    pub fn failing(self, ids: &[u32]) -> Self {
        self.failing.lock().unwrap().extend(ids.iter().copied());
        self
    }

    pub fn with_listing_down(self) -> Self {
        self.listing_down.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_listing_down(&self, down: bool) {
        self.listing_down.store(down, Ordering::SeqCst);
    }

    /// The next listing waits `delay` and then lists only `ids`
    pub fn with_slow_listing(self, delay: Duration, ids: &[u32]) -> Self {
        *self.slow_listing.lock().unwrap() = Some((delay, ids.to_vec()));
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    fn detail(&self, id: u32) -> CatalogResult<Creature> {
        if self.failing.lock().unwrap().contains(&id) {
            return Err(CatalogError::detail_unavailable(
                format!("pokemon/{id}"),
                "HTTP error! status: 500",
            ));
        }
        self.creatures
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::detail_unavailable(format!("pokemon/{id}"), "HTTP error! status: 404"))
    }
}

fn collect_species(link: &EvolutionLink, chain_id: u32, into: &mut HashMap<u32, u32>) {
    into.insert(link.species_id, chain_id);
    for child in &link.evolves_to {
        collect_species(child, chain_id, into);
    }
}

#[async_trait]
impl CreatureSource for FixtureSource {
    async fn list_identities(&self) -> CatalogResult<Vec<IdentityRef>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(CatalogError::source_unavailable("connection refused"));
        }
        let slow = self.slow_listing.lock().unwrap().take();
        let order = match slow {
            Some((delay, ids)) => {
                tokio::time::sleep(delay).await;
                ids
            }
            None => self.order.clone(),
        };
        Ok(order
            .iter()
            .map(|id| IdentityRef {
                id: *id,
                name: self.creatures[id].name.clone(),
                detail: DetailRef::new(format!("https://pokeapi.example/api/v2/pokemon/{id}/")),
            })
            .collect())
    }

    async fn fetch_detail(&self, detail: &DetailRef) -> CatalogResult<Creature> {
        let id = detail
            .trailing_id()
            .ok_or_else(|| CatalogError::detail_unavailable(detail.as_str(), "no id"))?;
        self.detail(id)
    }

    async fn fetch_creature(&self, id: u32) -> CatalogResult<Creature> {
        self.detail(id)
    }

    async fn fetch_species(&self, species_id: u32) -> CatalogResult<SpeciesDescriptor> {
        let chain_id = self.species_chain.get(&species_id).ok_or_else(|| {
            CatalogError::evolution_unavailable(species_id, "HTTP error! status: 404")
        })?;
        Ok(SpeciesDescriptor {
            id: species_id,
            name: self
                .creatures
                .get(&species_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            evolution_chain: DetailRef::new(format!(
                "https://pokeapi.example/api/v2/evolution-chain/{chain_id}/"
            )),
        })
    }

    async fn fetch_evolution_graph(&self, chain: &DetailRef) -> CatalogResult<EvolutionLink> {
        let chain_id = chain.trailing_id().unwrap_or_default();
        self.chains
            .get(&chain_id)
            .cloned()
            .ok_or_else(|| CatalogError::evolution_unavailable(chain_id, "HTTP error! status: 404"))
    }
}
