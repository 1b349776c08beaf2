//! Messages exchanged between the catalog core and the UI layer
//!
//! - `catalog`: load state and the visible subset
//! - `selection`: comparison/team snapshots with their aggregates
//! - `evolution`: the inspected creature's evolution sequence

pub mod catalog;
pub mod evolution;
pub mod selection;

pub use catalog::{CatalogSnapshot, LoadState};
pub use evolution::EvolutionSnapshot;
pub use selection::{ChartRow, SelectionKind, SelectionSnapshot};
