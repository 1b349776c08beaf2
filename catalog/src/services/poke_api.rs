//! PokeAPI-backed creature source
//!
//! Maps the remote JSON schema onto the catalog data model. Transport and
//! status failures are reported with the error kind that matches the call.

use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use std::collections::BTreeMap;

use shared::{component_debug, logging::ComponentId, Ability, Creature, PokemonType, StatName};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::traits::CreatureSource;
use crate::types::{DetailRef, EvolutionLink, IdentityRef, SpeciesDescriptor};

/// Creature source talking to a PokeAPI-compatible HTTP service
#[derive(Clone)]
pub struct PokeApiSource {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl PokeApiSource {
    /// Create a source with a client honouring the configured timeout
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            CatalogError::Shared(shared::SharedError::config("http_client", e.to_string()))
        })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Absolute URL for a reference that may be relative to the API base
    fn resolve(&self, reference: &DetailRef) -> String {
        let raw = reference.as_str();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            self.config.endpoint(raw)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        component_debug!(ComponentId::current(), "GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("HTTP error! status: {}", response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("malformed response: {e}"))
    }
}

#[async_trait]
impl CreatureSource for PokeApiSource {
    async fn list_identities(&self) -> CatalogResult<Vec<IdentityRef>> {
        let url = self
            .config
            .endpoint(&format!("pokemon?limit={}", self.config.listing_limit));
        let listing: ListingDto = self
            .get_json(&url)
            .await
            .map_err(CatalogError::source_unavailable)?;

        Ok(listing
            .results
            .into_iter()
            .filter_map(|entry| {
                let detail = DetailRef::new(entry.url);
                detail.trailing_id().map(|id| IdentityRef {
                    id,
                    name: entry.name,
                    detail,
                })
            })
            .collect())
    }

    async fn fetch_detail(&self, detail: &DetailRef) -> CatalogResult<Creature> {
        let url = self.resolve(detail);
        let dto: CreatureDto = self
            .get_json(&url)
            .await
            .map_err(|message| CatalogError::detail_unavailable(detail.as_str(), message))?;
        dto.into_creature()
            .map_err(|message| CatalogError::detail_unavailable(detail.as_str(), message))
    }

    async fn fetch_creature(&self, id: u32) -> CatalogResult<Creature> {
        self.fetch_detail(&DetailRef::new(format!("pokemon/{id}"))).await
    }

    async fn fetch_species(&self, species_id: u32) -> CatalogResult<SpeciesDescriptor> {
        let url = self.config.endpoint(&format!("pokemon-species/{species_id}"));
        let dto: SpeciesDto = self
            .get_json(&url)
            .await
            .map_err(|message| CatalogError::evolution_unavailable(species_id, message))?;

        let chain = dto.evolution_chain.ok_or_else(|| {
            CatalogError::evolution_unavailable(species_id, "species has no evolution chain")
        })?;

        Ok(SpeciesDescriptor {
            id: dto.id,
            name: dto.name,
            evolution_chain: DetailRef::new(chain.url),
        })
    }

    async fn fetch_evolution_graph(&self, chain: &DetailRef) -> CatalogResult<EvolutionLink> {
        let chain_id = chain.trailing_id().unwrap_or_default();
        let url = self.resolve(chain);
        let dto: ChainDto = self
            .get_json(&url)
            .await
            .map_err(|message| CatalogError::evolution_unavailable(chain_id, message))?;
        dto.chain
            .into_link()
            .map_err(|message| CatalogError::evolution_unavailable(chain_id, message))
    }
}

// Remote schema

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ListingDto {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct TypeSlotDto {
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatDto {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlotDto {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ArtworkDto {
    front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OtherSpritesDto {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<ArtworkDto>,
}

#[derive(Debug, Default, Deserialize)]
struct SpritesDto {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<OtherSpritesDto>,
}

#[derive(Debug, Deserialize)]
struct CreatureDto {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    base_experience: Option<u32>,
    types: Vec<TypeSlotDto>,
    stats: Vec<StatDto>,
    #[serde(default)]
    abilities: Vec<AbilitySlotDto>,
    #[serde(default)]
    sprites: SpritesDto,
    #[serde(default)]
    moves: Vec<IgnoredAny>,
}

impl CreatureDto {
    fn into_creature(self) -> Result<Creature, String> {
        let types = self
            .types
            .iter()
            .map(|slot| slot.type_.name.parse::<PokemonType>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;

        let mut stats = BTreeMap::new();
        for entry in &self.stats {
            let stat = entry.stat.name.parse::<StatName>().map_err(|e| e.to_string())?;
            stats.insert(stat, entry.base_stat);
        }

        let mut abilities: Vec<Ability> = Vec::with_capacity(self.abilities.len());
        for slot in self.abilities {
            if !abilities.iter().any(|a| a.name == slot.ability.name) {
                abilities.push(Ability::new(slot.ability.name, slot.is_hidden));
            }
        }

        let artwork = self
            .sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default);
        let sprite_url = artwork.or(self.sprites.front_default);

        Ok(Creature {
            id: self.id,
            name: self.name,
            types,
            stats,
            height: self.height,
            weight: self.weight,
            abilities,
            sprite_url,
            moves_count: self.moves.len() as u32,
            base_experience: self.base_experience,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChainUrlDto {
    url: String,
}

#[derive(Debug, Deserialize)]
struct SpeciesDto {
    id: u32,
    name: String,
    evolution_chain: Option<ChainUrlDto>,
}

#[derive(Debug, Deserialize)]
struct ChainLinkDto {
    species: NamedResource,
    #[serde(default)]
    evolves_to: Vec<ChainLinkDto>,
}

impl ChainLinkDto {
    fn into_link(self) -> Result<EvolutionLink, String> {
        let species_ref = DetailRef::new(self.species.url);
        let species_id = species_ref
            .trailing_id()
            .ok_or_else(|| format!("species reference without id: {species_ref}"))?;
        let children = self
            .evolves_to
            .into_iter()
            .map(ChainLinkDto::into_link)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EvolutionLink::new(species_id, self.species.name).evolves_to(children))
    }
}

#[derive(Debug, Deserialize)]
struct ChainDto {
    chain: ChainLinkDto,
}
