//! Creature catalog library
//!
//! Loads the catalog from a `CreatureSource`, filters and sorts it through a
//! debounced query engine, keeps bounded comparison and team selections with
//! their aggregates, and resolves evolution trees for inspection.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod session;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::CatalogConfig;
pub use core::{recompute, RecordStore, SelectionSet};
pub use error::{CatalogError, CatalogResult};
pub use services::{load_catalog, EvolutionResolver, PokeApiSource, QueryEngine, QueryResult};
pub use session::CatalogSession;
pub use traits::{CreatureSource, MockCreatureSource};
pub use types::{DetailRef, EvolutionLink, IdentityRef, LoadReport, SpeciesDescriptor, StoreHandle};
