//! Test helpers and builder patterns for catalog session tests

use std::sync::Arc;
use std::time::Duration;

use catalog::{CatalogConfig, CatalogSession};
use shared::Creature;

use super::fixtures::FixtureSource;

/// Builder for sessions over the fixture source
pub struct SessionBuilder {
    source: FixtureSource,
    debounce: Duration,
    concurrency: usize,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            source: FixtureSource::new(),
            debounce: Duration::from_millis(300),
            concurrency: 4,
        }
    }

    pub fn with_source(mut self, source: FixtureSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn build(self) -> CatalogSession<FixtureSource> {
        self.build_shared().1
    }

    /// Session plus a handle on its source, for toggling failures mid-test
    pub fn build_shared(self) -> (Arc<FixtureSource>, CatalogSession<FixtureSource>) {
        let mut config = CatalogConfig::default().with_debounce(self.debounce);
        config.detail_concurrency = self.concurrency;
        let source = Arc::new(self.source);
        let session = CatalogSession::with_shared_source(Arc::clone(&source), config);
        (source, session)
    }
}

/// Common assertions and setups
pub struct TestHelpers;

impl TestHelpers {
    /// A session over the full fixture catalog, already loaded
    pub async fn loaded_session() -> CatalogSession<FixtureSource> {
        let session = SessionBuilder::new().build();
        session.load().await.expect("fixture catalog loads");
        session
    }

    pub fn ids(creatures: &[Creature]) -> Vec<u32> {
        creatures.iter().map(|c| c.id).collect()
    }
}
