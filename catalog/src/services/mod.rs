//! Service implementations
//!
//! Production implementations of the catalog's I/O and scheduling
//! concerns: the PokeAPI source, the initial loader, the debounced query
//! engine and the evolution resolver.

pub mod evolution_resolver;
pub mod loader;
pub mod poke_api;
pub mod query_engine;

#[cfg(test)]
mod tests;

pub use evolution_resolver::{EvolutionResolver, Inspection};
pub use loader::load_catalog;
pub use poke_api::PokeApiSource;
pub use query_engine::{QueryEngine, QueryResult};
