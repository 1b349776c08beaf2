//! Immutable record store
//!
//! Populated once from the loader and shared read-only afterwards through a
//! `StoreHandle`. Records keep the order the source listed them in, which is
//! the tie-break order for every sort.

use std::collections::HashMap;

use shared::{component_warn, logging::ComponentId, Creature};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Creature>,
    index: HashMap<u32, usize>,
}

impl RecordStore {
    /// Build a store; a repeated id keeps its first record
    pub fn new(creatures: Vec<Creature>) -> Self {
        let mut records = Vec::with_capacity(creatures.len());
        let mut index = HashMap::with_capacity(creatures.len());

        for creature in creatures {
            if index.contains_key(&creature.id) {
                component_warn!(
                    ComponentId::current(),
                    "Duplicate creature id {} ({}) ignored",
                    creature.id,
                    creature.name
                );
                continue;
            }
            index.insert(creature.id, records.len());
            records.push(creature);
        }

        Self { records, index }
    }

    pub fn get(&self, id: u32) -> Option<&Creature> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.iter().map(|creature| creature.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Creature> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Creature>>(iter: I) -> Self {
        RecordStore::new(iter.into_iter().collect())
    }
}
