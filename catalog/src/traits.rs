//! Trait definitions with mockall annotations for testing
//!
//! The catalog core never talks to the network directly; it consumes a
//! `CreatureSource`, which lets tests inject mocks or in-memory fixtures.

use shared::Creature;

use crate::error::CatalogResult;
use crate::types::{DetailRef, EvolutionLink, IdentityRef, SpeciesDescriptor};

/// Data-access abstraction over the remote creature catalog
#[mockall::automock]
#[async_trait::async_trait]
pub trait CreatureSource: Send + Sync {
    /// List every identity in the catalog
    ///
    /// # Returns
    /// Identities in source order, or `SourceUnavailable` on transport error
    async fn list_identities(&self) -> CatalogResult<Vec<IdentityRef>>;

    /// Fetch the full record behind a listing entry
    ///
    /// # Returns
    /// The creature, or `DetailUnavailable` for this identity only
    async fn fetch_detail(&self, detail: &DetailRef) -> CatalogResult<Creature>;

    /// Fetch a record by its numeric id
    async fn fetch_creature(&self, id: u32) -> CatalogResult<Creature>;

    /// Resolve a species descriptor, which points at its evolution graph
    async fn fetch_species(&self, species_id: u32) -> CatalogResult<SpeciesDescriptor>;

    /// Fetch the root node of an evolution graph
    async fn fetch_evolution_graph(&self, chain: &DetailRef) -> CatalogResult<EvolutionLink>;
}
