//! Debounced query engine
//!
//! Criteria changes are collapsed with a trailing-edge debounce: every
//! `schedule` supersedes the pending one, and only the latest criteria are
//! evaluated once the quiescence window elapses. Results are published on a
//! `watch` channel tagged with a monotone revision.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use shared::{component_debug, logging::ComponentId, Creature, Criteria};

use crate::core::recompute;
use crate::types::StoreHandle;

/// Output of one completed recomputation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Number of recomputations published so far
    pub revision: u64,
    pub criteria: Criteria,
    pub creatures: Vec<Creature>,
}

pub struct QueryEngine {
    debounce: Duration,
    /// Bumped by every schedule/cancel; a timer only publishes if its epoch is current
    epoch: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    results: Arc<watch::Sender<QueryResult>>,
}

impl QueryEngine {
    pub fn new(debounce: Duration) -> Self {
        let (results, _) = watch::channel(QueryResult::default());
        Self {
            debounce,
            epoch: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            results: Arc::new(results),
        }
    }

    /// Request a recomputation after the quiescence window
    ///
    /// Supersedes any pending request. Must be called inside a tokio runtime.
    pub fn schedule(&self, store: StoreHandle, criteria: Criteria) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.epoch);
        let results = Arc::clone(&self.results);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if current.load(Ordering::SeqCst) != epoch {
                return;
            }
            let creatures = recompute(&store, &criteria);
            publish(&results, &current, epoch, criteria, creatures);
        });

        self.replace_pending(Some(handle));
    }

    /// Drop the pending request, if any, without computing
    pub fn cancel_pending(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.replace_pending(None);
    }

    /// Cancel anything pending and recompute immediately
    pub fn recompute_now(&self, store: &StoreHandle, criteria: Criteria) -> QueryResult {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.replace_pending(None);

        let creatures = recompute(store, &criteria);
        publish(&self.results, &self.epoch, epoch, criteria, creatures);
        self.latest()
    }

    /// Whether a debounced request is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|pending| pending.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    pub fn latest(&self) -> QueryResult {
        self.results.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryResult> {
        self.results.subscribe()
    }

    fn replace_pending(&self, next: Option<JoinHandle<()>>) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = std::mem::replace(&mut *pending, next) {
            previous.abort();
        }
    }
}

impl Drop for QueryEngine {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Publish a result unless a newer request was issued meanwhile
fn publish(
    results: &watch::Sender<QueryResult>,
    current: &AtomicU64,
    epoch: u64,
    criteria: Criteria,
    creatures: Vec<Creature>,
) {
    let published = results.send_if_modified(|latest| {
        if current.load(Ordering::SeqCst) != epoch {
            return false;
        }
        latest.revision += 1;
        latest.criteria = criteria;
        latest.creatures = creatures;
        true
    });

    if published {
        let latest = results.borrow();
        component_debug!(
            ComponentId::current(),
            "Query revision {} published with {} creatures",
            latest.revision,
            latest.creatures.len()
        );
    }
}
