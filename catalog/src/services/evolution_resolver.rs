//! Evolution resolver
//!
//! Walks the remote evolution graph of an inspected creature and attaches
//! the display details of every stage. Each inspection gets a token from a
//! counter that lives under the same lock as the state, and a resolution
//! only commits while its token is still the latest issued one. An
//! inspection started later therefore always wins over one that merely
//! finishes later.

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::RwLock;

use shared::{
    component_debug, component_info, component_warn, logging::ComponentId, EvolutionNode,
    EvolutionState,
};

use crate::error::{CatalogError, CatalogResult};
use crate::traits::CreatureSource;
use crate::types::EvolutionLink;

/// Ticket for one issued inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inspection {
    pub token: u64,
    pub creature_id: u32,
}

#[derive(Debug, Default)]
struct InspectionSlot {
    issued: u64,
    state: EvolutionState,
}

pub struct EvolutionResolver<S: CreatureSource + ?Sized> {
    source: Arc<S>,
    slot: RwLock<InspectionSlot>,
}

impl<S: CreatureSource + ?Sized> EvolutionResolver<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            slot: RwLock::new(InspectionSlot::default()),
        }
    }

    /// Inspect a creature and wait for its resolution to settle
    ///
    /// Returns the state held once this resolution is done. When a newer
    /// inspection was issued in the meantime that is the newer one's state.
    pub async fn inspect(&self, creature_id: u32) -> EvolutionState {
        let inspection = self.begin(creature_id).await;
        self.run(inspection).await
    }

    /// Issue a new inspection: invalidates the previous one and enters `Loading`
    pub async fn begin(&self, creature_id: u32) -> Inspection {
        let mut slot = self.slot.write().await;
        slot.issued += 1;
        slot.state = EvolutionState::Loading { creature_id };
        Inspection {
            token: slot.issued,
            creature_id,
        }
    }

    /// Resolve an issued inspection and commit it if it is still current
    pub async fn run(&self, inspection: Inspection) -> EvolutionState {
        let creature_id = inspection.creature_id;
        let next = match self.resolve(creature_id).await {
            Ok(tree) => {
                component_info!(
                    ComponentId::current(),
                    "Evolution tree for #{} resolved with {} stages",
                    creature_id,
                    tree.node_count()
                );
                EvolutionState::Ready { creature_id, tree }
            }
            Err(e) => {
                component_warn!(ComponentId::current(), "{}", e);
                EvolutionState::Failed {
                    creature_id,
                    reason: e.to_string(),
                }
            }
        };

        let mut slot = self.slot.write().await;
        if slot.issued == inspection.token {
            slot.state = next;
        } else {
            component_debug!(
                ComponentId::current(),
                "Discarding stale resolution for #{} (token {}, latest {})",
                creature_id,
                inspection.token,
                slot.issued
            );
        }
        slot.state.clone()
    }

    /// Close the inspection panel; any in-flight resolution is discarded
    pub async fn close(&self) {
        let mut slot = self.slot.write().await;
        slot.issued += 1;
        slot.state = EvolutionState::Idle;
    }

    pub async fn state(&self) -> EvolutionState {
        self.slot.read().await.state.clone()
    }

    /// Species descriptor, then the graph root, then every node depth-first
    ///
    /// Any failure fails the whole resolution as `EvolutionUnavailable`.
    pub async fn resolve(&self, creature_id: u32) -> CatalogResult<EvolutionNode> {
        let unavailable = |e: CatalogError| match e {
            CatalogError::EvolutionUnavailable { .. } => e,
            other => CatalogError::evolution_unavailable(creature_id, other.to_string()),
        };

        let species = self
            .source
            .fetch_species(creature_id)
            .await
            .map_err(unavailable)?;
        let root = self
            .source
            .fetch_evolution_graph(&species.evolution_chain)
            .await
            .map_err(unavailable)?;

        self.resolve_node(&root).await.map_err(unavailable)
    }

    fn resolve_node<'a>(&'a self, link: &'a EvolutionLink) -> BoxFuture<'a, CatalogResult<EvolutionNode>> {
        async move {
            let creature = self.source.fetch_creature(link.species_id).await?;

            // Siblings are resolved one after another, in source order
            let mut children = Vec::with_capacity(link.evolves_to.len());
            for child in &link.evolves_to {
                children.push(self.resolve_node(child).await?);
            }

            Ok(EvolutionNode {
                species_id: link.species_id,
                name: link.name.clone(),
                sprite_url: creature.sprite_url,
                types: creature.types,
                children,
            })
        }
        .boxed()
    }
}
