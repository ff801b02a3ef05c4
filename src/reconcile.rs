//! Record table shared by both registries, with merge-if-absent
//! reconciliation of enumeration snapshots.
//!
//! An enumeration result only ever fills gaps: an id the registry already
//! tracks keeps its existing record (with whatever frames, metadata or native
//! handle accumulated on it) and the incoming copy is discarded. This makes
//! enumeration idempotent and safe to interleave with lifecycle events.
//!
//! Every insert stamps the record with a fresh generation. A removal only
//! deletes the generation it broadcast, so a record re-created while the
//! removal is being announced survives.

use std::collections::HashMap;
use std::hash::Hash;

/// Outcome of reconciling one snapshot
#[derive(Debug, Clone)]
pub struct Reconciled<V> {
    /// Registry records for every snapshot item, in snapshot order
    pub records: Vec<V>,
    /// Number of ids that were absent and got inserted
    pub inserted: usize,
}

#[derive(Debug, Clone)]
struct Slot<V> {
    generation: u64,
    record: V,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordTable<K, V> {
    slots: HashMap<K, Slot<V>>,
    next_generation: u64,
}

impl<K: Eq + Hash, V> RecordTable<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_generation: 0,
        }
    }

    fn stamp(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.slots.get(key).map(|slot| &slot.record)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.slots.get_mut(key).map(|slot| &mut slot.record)
    }

    /// The record under `key` together with the generation it was inserted at.
    pub(crate) fn tracked(&self, key: &K) -> Option<(u64, &V)> {
        self.slots
            .get(key)
            .map(|slot| (slot.generation, &slot.record))
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.slots.keys()
    }

    /// Insert or overwrite; either way the record starts a new generation.
    pub(crate) fn insert(&mut self, key: K, record: V) -> Option<V> {
        let generation = self.stamp();
        self.slots
            .insert(key, Slot { generation, record })
            .map(|slot| slot.record)
    }

    /// Remove `key` only if it still holds the record inserted at `generation`.
    pub(crate) fn remove_generation(&mut self, key: &K, generation: u64) -> Option<V> {
        match self.slots.get(key) {
            Some(slot) if slot.generation == generation => {
                self.slots.remove(key).map(|slot| slot.record)
            }
            _ => None,
        }
    }

    /// Insert every snapshot item whose key is absent; keep existing records.
    pub(crate) fn merge_if_absent<I, F>(&mut self, snapshot: I, key_of: F) -> Reconciled<V>
    where
        V: Clone,
        I: IntoIterator<Item = V>,
        F: Fn(&V) -> K,
    {
        let mut records = Vec::new();
        let mut inserted = 0;
        for incoming in snapshot {
            let key = key_of(&incoming);
            if let Some(existing) = self.get(&key) {
                records.push(existing.clone());
                continue;
            }
            records.push(incoming.clone());
            self.insert(key, incoming);
            inserted += 1;
        }
        Reconciled { records, inserted }
    }
}

impl<K: Eq + Hash, V> Default for RecordTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
