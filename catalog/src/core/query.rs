//! Visible-subset computation
//!
//! `recompute` is a pure function of the store and the criteria; the
//! debounced scheduling around it lives in `services::query_engine`.

use shared::{Creature, Criteria};

use super::predicate;
use super::sort;
use super::store::RecordStore;

/// Filter the store by `criteria`, then stable-sort by its sort key
pub fn recompute(store: &RecordStore, criteria: &Criteria) -> Vec<Creature> {
    let keep = predicate::build(criteria);
    let mut visible: Vec<&Creature> = store.iter().filter(|creature| keep(*creature)).collect();
    sort::sort_creatures(&mut visible, criteria.sort_key);
    visible.into_iter().cloned().collect()
}
