//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used across the catalog test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::{FixtureSource, TestFixtures};
pub use helpers::{SessionBuilder, TestHelpers};
