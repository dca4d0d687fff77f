//! Order id to store key lookup, for O(1) cancel.

use std::collections::HashMap;

use crate::orderbook::OrderKey;

/// Maps every resting order id to its record in the order store.
///
/// Holds exactly the ids currently resting on either side; entries are
/// written by `PriceLevel::add` and erased by `PriceLevel::remove`.
#[derive(Debug, Default, Clone)]
pub struct OrderIndex {
    keys: HashMap<u64, OrderKey>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: HashMap::with_capacity(capacity),
        }
    }

    /// Register `id`, returning the key it previously mapped to
    #[inline]
    pub fn insert(&mut self, id: u64, key: OrderKey) -> Option<OrderKey> {
        self.keys.insert(id, key)
    }

    #[inline]
    pub fn get(&self, id: u64) -> Option<OrderKey> {
        self.keys.get(&id).copied()
    }

    #[inline]
    pub fn remove(&mut self, id: u64) -> Option<OrderKey> {
        self.keys.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All `(id, key)` pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (u64, OrderKey)> + '_ {
        self.keys.iter().map(|(&id, &key)| (id, key))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
