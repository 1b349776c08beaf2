//! Source-level data types returned by a `CreatureSource`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::RecordStore;

/// Read-only handle to a loaded record store
pub type StoreHandle = Arc<RecordStore>;

/// Opaque reference to a remote resource (a URL for the PokeAPI source)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailRef(String);

impl DetailRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric id carried in the last path segment (`.../pokemon/25/` -> 25)
    pub fn trailing_id(&self) -> Option<u32> {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

impl fmt::Display for DetailRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the identity listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRef {
    pub id: u32,
    pub name: String,
    pub detail: DetailRef,
}

/// Species descriptor, the entry point to an evolution graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesDescriptor {
    pub id: u32,
    pub name: String,
    pub evolution_chain: DetailRef,
}

/// Raw node of the remote evolution graph, before creature details are attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionLink {
    pub species_id: u32,
    pub name: String,
    pub evolves_to: Vec<EvolutionLink>,
}

impl EvolutionLink {
    pub fn new(species_id: u32, name: impl Into<String>) -> Self {
        Self {
            species_id,
            name: name.into(),
            evolves_to: Vec::new(),
        }
    }

    pub fn evolves_to(mut self, children: Vec<EvolutionLink>) -> Self {
        self.evolves_to = children;
        self
    }
}

/// Outcome of the initial dataset load
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub store: StoreHandle,
    /// Identities returned by the listing
    pub requested: usize,
    pub loaded: usize,
    /// Identities whose detail fetch failed and were omitted
    pub failed: usize,
}
