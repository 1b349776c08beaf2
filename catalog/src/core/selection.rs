//! Bounded, duplicate-free selection sets (comparison and team)

use shared::{Creature, SelectionKind};

/// Insertion-ordered set of creatures with a fixed capacity
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSet {
    kind: SelectionKind,
    members: Vec<Creature>,
}

impl SelectionSet {
    pub fn new(kind: SelectionKind) -> Self {
        Self {
            kind,
            members: Vec::with_capacity(kind.capacity()),
        }
    }

    /// Comparison set, capacity 3
    pub fn comparison() -> Self {
        Self::new(SelectionKind::Comparison)
    }

    /// Team set, capacity 6
    pub fn team() -> Self {
        Self::new(SelectionKind::Team)
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.kind.capacity()
    }

    /// Append unless already present or full; returns whether it was added
    pub fn add(&mut self, creature: Creature) -> bool {
        if !self.can_add(creature.id) {
            return false;
        }
        self.members.push(creature);
        true
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);
        self.members.len() != before
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn contains(&self, id: u32) -> bool {
        self.members.iter().any(|member| member.id == id)
    }

    pub fn can_add(&self, id: u32) -> bool {
        !self.is_full() && !self.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Creature] {
        &self.members
    }

    pub fn ids(&self) -> Vec<u32> {
        self.members.iter().map(|member| member.id).collect()
    }
}
