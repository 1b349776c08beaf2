//! Catalog session
//!
//! Ties the record store, criteria, query engine, selection sets and the
//! evolution resolver together behind one facade. Every user action is a
//! single read-modify-write on the session state; derived data is handed
//! out as serializable snapshots.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use shared::{
    component_debug, component_info,
    logging::{self, ComponentId},
    CatalogSnapshot, Creature, Criteria, EvolutionSnapshot, EvolutionState, Generation, LoadState,
    PokemonType, SelectionKind, SelectionSnapshot, SortKey, StatName,
};

use crate::config::CatalogConfig;
use crate::core::{aggregation, evolution, SelectionSet};
use crate::error::{CatalogError, CatalogResult};
use crate::services::{load_catalog, EvolutionResolver, Inspection, QueryEngine, QueryResult};
use crate::traits::CreatureSource;
use crate::types::{LoadReport, StoreHandle};

/// Mutable session state, guarded as a unit
#[derive(Debug)]
struct SessionState {
    store: Option<StoreHandle>,
    load_state: LoadState,
    /// Token of the most recently issued load; only that load may commit
    load_epoch: u64,
    criteria: Criteria,
    comparison: SelectionSet,
    team: SelectionSet,
}

impl SessionState {
    fn new() -> Self {
        Self {
            store: None,
            load_state: LoadState::NotStarted,
            load_epoch: 0,
            criteria: Criteria::default(),
            comparison: SelectionSet::comparison(),
            team: SelectionSet::team(),
        }
    }

    fn selection_mut(&mut self, kind: SelectionKind) -> &mut SelectionSet {
        match kind {
            SelectionKind::Comparison => &mut self.comparison,
            SelectionKind::Team => &mut self.team,
        }
    }

    fn selection(&self, kind: SelectionKind) -> &SelectionSet {
        match kind {
            SelectionKind::Comparison => &self.comparison,
            SelectionKind::Team => &self.team,
        }
    }

    fn lookup(&self, id: u32) -> CatalogResult<Creature> {
        let store = self.store.as_ref().ok_or(CatalogError::NotLoaded)?;
        store
            .get(id)
            .cloned()
            .ok_or(CatalogError::UnknownCreature { id })
    }
}

/// One user's view of the catalog
pub struct CatalogSession<S>
where
    S: CreatureSource + 'static,
{
    source: Arc<S>,
    config: CatalogConfig,
    state: Mutex<SessionState>,
    engine: QueryEngine,
    resolver: EvolutionResolver<S>,
}

impl<S> CatalogSession<S>
where
    S: CreatureSource + 'static,
{
    pub fn new(source: S, config: CatalogConfig) -> Self {
        Self::with_shared_source(Arc::new(source), config)
    }

    pub fn with_shared_source(source: Arc<S>, config: CatalogConfig) -> Self {
        Self {
            engine: QueryEngine::new(config.debounce),
            resolver: EvolutionResolver::new(Arc::clone(&source)),
            state: Mutex::new(SessionState::new()),
            source,
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Load the dataset and compute the first visible list
    ///
    /// On `SourceUnavailable` the session stays usable with its previous
    /// store (if any) and reports the failure in its load state. When loads
    /// overlap, only the most recently issued one commits; an older load that
    /// finishes later returns its report without touching the session.
    pub async fn load(&self) -> CatalogResult<LoadReport> {
        let component = ComponentId::current();
        let token = {
            let mut state = self.state.lock().await;
            state.load_epoch += 1;
            state.load_state = LoadState::Loading;
            state.load_epoch
        };

        let outcome = load_catalog(self.source.as_ref(), self.config.detail_concurrency).await;

        let mut state = self.state.lock().await;
        if state.load_epoch != token {
            component_debug!(component, "Load #{} superseded by #{}, discarding", token, state.load_epoch);
            return outcome;
        }

        match outcome {
            Ok(report) => {
                state.store = Some(Arc::clone(&report.store));
                state.load_state = LoadState::Ready {
                    count: report.loaded,
                    failed: report.failed,
                };
                self.engine.recompute_now(&report.store, state.criteria.clone());
                Ok(report)
            }
            Err(e) => {
                logging::log_error(component, "Catalog load", &e);
                state.load_state = LoadState::Failed {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// User-initiated retry of the full load
    pub async fn reload(&self) -> CatalogResult<LoadReport> {
        component_info!(ComponentId::current(), "Reloading catalog");
        self.load().await
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.lock().await.load_state.clone()
    }

    pub async fn store(&self) -> Option<StoreHandle> {
        self.state.lock().await.store.clone()
    }

    // Criteria

    pub async fn criteria(&self) -> Criteria {
        self.state.lock().await.criteria.clone()
    }

    /// Apply `change` to the criteria and schedule a debounced recompute
    pub async fn update_criteria<F, R>(&self, change: F) -> R
    where
        F: FnOnce(&mut Criteria) -> R,
    {
        let mut state = self.state.lock().await;
        let outcome = change(&mut state.criteria);
        if let Some(store) = state.store.clone() {
            self.engine.schedule(store, state.criteria.clone());
        }
        outcome
    }

    pub async fn replace_criteria(&self, criteria: Criteria) {
        self.update_criteria(|current| *current = criteria).await
    }

    pub async fn set_search(&self, text: impl Into<String>) {
        let text = text.into();
        self.update_criteria(|criteria| criteria.search_text = text).await
    }

    pub async fn toggle_type(&self, pokemon_type: PokemonType) {
        self.update_criteria(|criteria| criteria.toggle_type(pokemon_type)).await
    }

    pub async fn toggle_generation(&self, generation: Generation) {
        self.update_criteria(|criteria| criteria.toggle_generation(generation)).await
    }

    pub async fn set_min_stat(&self, stat: StatName, value: u32) -> CatalogResult<()> {
        self.update_criteria(|criteria| criteria.set_min_stat(stat, value))
            .await
            .map_err(CatalogError::from)
    }

    pub async fn set_sort(&self, sort_key: SortKey) {
        self.update_criteria(|criteria| criteria.sort_key = sort_key).await
    }

    pub async fn clear_filters(&self) {
        self.update_criteria(Criteria::clear_filters).await
    }

    /// Skip the debounce and recompute with the current criteria
    pub async fn flush(&self) -> CatalogResult<QueryResult> {
        let state = self.state.lock().await;
        let store = state.store.as_ref().ok_or(CatalogError::NotLoaded)?;
        Ok(self.engine.recompute_now(store, state.criteria.clone()))
    }

    // Query results

    /// Latest published visible list
    pub fn visible(&self) -> Vec<Creature> {
        self.engine.latest().creatures
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryResult> {
        self.engine.subscribe()
    }

    /// Identity lookup against the loaded store
    pub async fn lookup(&self, id: u32) -> CatalogResult<Creature> {
        self.state.lock().await.lookup(id)
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let latest = self.engine.latest();
        let state = self.state.lock().await;
        CatalogSnapshot {
            load_state: state.load_state.clone(),
            total: state.store.as_ref().map_or(0, |store| store.len()),
            visible_count: latest.creatures.len(),
            revision: latest.revision,
            criteria: latest.criteria,
            creatures: latest.creatures,
        }
    }

    // Selection sets

    /// Add a loaded creature; `Ok(false)` when already present or full
    pub async fn add_to(&self, kind: SelectionKind, id: u32) -> CatalogResult<bool> {
        let mut state = self.state.lock().await;
        let creature = state.lookup(id)?;
        let added = state.selection_mut(kind).add(creature);
        component_debug!(ComponentId::current(), "{} add #{}: {}", kind, id, added);
        Ok(added)
    }

    pub async fn remove_from(&self, kind: SelectionKind, id: u32) -> bool {
        self.state.lock().await.selection_mut(kind).remove(id)
    }

    pub async fn clear_selection(&self, kind: SelectionKind) {
        self.state.lock().await.selection_mut(kind).clear();
    }

    pub async fn in_selection(&self, kind: SelectionKind, id: u32) -> bool {
        self.state.lock().await.selection(kind).contains(id)
    }

    pub async fn selection_snapshot(&self, kind: SelectionKind) -> SelectionSnapshot {
        aggregation::snapshot(self.state.lock().await.selection(kind))
    }

    pub async fn add_to_comparison(&self, id: u32) -> CatalogResult<bool> {
        self.add_to(SelectionKind::Comparison, id).await
    }

    pub async fn remove_from_comparison(&self, id: u32) -> bool {
        self.remove_from(SelectionKind::Comparison, id).await
    }

    pub async fn add_to_team(&self, id: u32) -> CatalogResult<bool> {
        self.add_to(SelectionKind::Team, id).await
    }

    pub async fn remove_from_team(&self, id: u32) -> bool {
        self.remove_from(SelectionKind::Team, id).await
    }

    pub async fn comparison_snapshot(&self) -> SelectionSnapshot {
        self.selection_snapshot(SelectionKind::Comparison).await
    }

    pub async fn team_snapshot(&self) -> SelectionSnapshot {
        self.selection_snapshot(SelectionKind::Team).await
    }

    // Evolution inspection

    /// Inspect a loaded creature and wait for its evolution tree
    pub async fn inspect(&self, id: u32) -> CatalogResult<EvolutionState> {
        let inspection = self.begin_inspection(id).await?;
        Ok(self.resolver.run(inspection).await)
    }

    /// Enter `Loading` for a loaded creature without resolving yet
    pub async fn begin_inspection(&self, id: u32) -> CatalogResult<Inspection> {
        self.lookup(id).await?;
        Ok(self.resolver.begin(id).await)
    }

    pub async fn finish_inspection(&self, inspection: Inspection) -> EvolutionState {
        self.resolver.run(inspection).await
    }

    pub async fn close_inspection(&self) {
        self.resolver.close().await;
    }

    pub async fn evolution_state(&self) -> EvolutionState {
        self.resolver.state().await
    }

    pub async fn evolution_snapshot(&self) -> EvolutionSnapshot {
        let state = self.resolver.state().await;
        let steps = state.tree().map(evolution::flatten).unwrap_or_default();
        EvolutionSnapshot { state, steps }
    }

    /// Cancel pending recomputes and drop any in-flight inspection
    pub async fn shutdown(&self) {
        self.engine.cancel_pending();
        self.resolver.close().await;
        logging::log_shutdown(ComponentId::current(), "catalog session closed");
    }
}
