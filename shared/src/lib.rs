//! Shared types for the creature catalog
//!
//! Holds the data model, the snapshot messages handed to the UI layer,
//! the shared error type and logging helpers used by every crate.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{
    CatalogSnapshot, ChartRow, EvolutionSnapshot, LoadState, SelectionKind, SelectionSnapshot,
};
