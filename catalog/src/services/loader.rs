//! Initial dataset load
//!
//! One listing call followed by a bounded fan-out of detail fetches. Each
//! detail fails on its own; only a failed listing fails the load.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use shared::{component_warn, logging::{self, ComponentId}};

use crate::core::RecordStore;
use crate::error::{CatalogError, CatalogResult};
use crate::traits::CreatureSource;
use crate::types::LoadReport;

/// Fetch the listing and every detail behind it, `concurrency` at a time
///
/// Records keep listing order regardless of completion order. Identities
/// whose detail could not be fetched are logged and left out.
pub async fn load_catalog<S>(source: &S, concurrency: usize) -> CatalogResult<LoadReport>
where
    S: CreatureSource + ?Sized,
{
    let component = ComponentId::current();

    let identities = source.list_identities().await.map_err(|e| match e {
        CatalogError::SourceUnavailable { .. } => e,
        other => CatalogError::source_unavailable(other.to_string()),
    })?;
    let requested = identities.len();
    logging::log_progress(component, "Loading catalog", &format!("{requested} identities listed"));

    let outcomes: Vec<_> = stream::iter(identities)
        .map(|identity| async move {
            let outcome = source.fetch_detail(&identity.detail).await;
            (identity, outcome)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut creatures = Vec::with_capacity(requested);
    let mut failed = 0;
    for (identity, outcome) in outcomes {
        match outcome {
            Ok(creature) => creatures.push(creature),
            Err(e) => {
                failed += 1;
                component_warn!(component, "Skipping {} (#{}): {}", identity.name, identity.id, e);
            }
        }
    }

    let store = RecordStore::new(creatures);
    logging::log_success(
        component,
        &format!("Catalog loaded: {} records, {} failed", store.len(), failed),
    );

    Ok(LoadReport {
        loaded: store.len(),
        store: Arc::new(store),
        requested,
        failed,
    })
}
