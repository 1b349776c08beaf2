//! Core business logic modules
//!
//! Pure catalog logic with no I/O dependencies. Everything here is
//! deterministic and testable without a runtime.

pub mod aggregation;
pub mod evolution;
pub mod predicate;
pub mod query;
pub mod selection;
pub mod sort;
pub mod store;

pub use query::recompute;
pub use selection::SelectionSet;
pub use store::RecordStore;
