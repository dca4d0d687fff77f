//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at a single price.
//! Orders are kept in a doubly-linked list for FIFO ordering
//! (price-time priority).
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be removed in O(1) through the order index
//!
//! The level never releases records and never removes itself from its
//! ladder; the book does both.

use crate::orderbook::{OrderIndex, OrderKey};
use crate::store::OrderStore;

/// Queue metadata for one price. Order data lives in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price for this level; equals its ladder key
    pub price: u64,

    /// Sum of `remaining` over all member orders
    pub total_volume: u64,

    /// Oldest order (first to match)
    pub head: Option<OrderKey>,

    /// Newest order
    pub tail: Option<OrderKey>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_volume: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order at the tail and register it in the index.
    ///
    /// # Panics
    ///
    /// Panics if the record is already linked or has no remaining
    /// quantity.
    pub fn add<S: OrderStore>(&mut self, key: OrderKey, store: &mut S, index: &mut OrderIndex) {
        let node = store.node_mut(key);
        assert!(
            node.is_unlinked() && self.head != Some(key),
            "order {} is already linked",
            node.order_id()
        );
        assert!(node.remaining() > 0, "order {} rests with zero quantity", node.order_id());
        debug_assert_eq!(node.price(), self.price, "order added to wrong level");

        let order_id = node.order_id();
        let quantity = node.remaining();
        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail_key) => store.node_mut(tail_key).next = Some(key),
            // Empty list - this is also the head
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_volume += quantity;
        index.insert(order_id, key);
    }

    /// Unlink order `id` and erase it from the index.
    ///
    /// Returns the detached key for the caller to release, or `None` if
    /// `id` is not indexed. The order must belong to this level.
    pub fn remove<S: OrderStore>(
        &mut self,
        id: u64,
        store: &mut S,
        index: &mut OrderIndex,
    ) -> Option<OrderKey> {
        let key = index.remove(id)?;

        let node = store.node_mut(key);
        debug_assert_eq!(node.price(), self.price, "order removed from wrong level");
        let quantity = node.remaining();
        let prev_key = node.prev.take();
        let next_key = node.next.take();

        match prev_key {
            Some(prev) => store.node_mut(prev).next = next_key,
            // This was the head
            None => self.head = next_key,
        }
        match next_key {
            Some(next) => store.node_mut(next).prev = prev_key,
            // This was the tail
            None => self.tail = prev_key,
        }

        self.order_count -= 1;
        self.total_volume -= quantity;

        Some(key)
    }

    /// Oldest order's key; the next one to match
    #[inline]
    pub fn peek_head(&self) -> Option<OrderKey> {
        self.head
    }

    /// Account for a partial fill of a member order
    #[inline]
    pub fn reduce_volume(&mut self, traded: u64) {
        debug_assert!(traded <= self.total_volume, "level volume underflow");
        self.total_volume -= traded;
    }

    /// Member keys in FIFO order
    pub fn keys<'a, S: OrderStore>(&self, store: &'a S) -> impl Iterator<Item = OrderKey> + 'a {
        std::iter::successors(self.head, move |&key| store.node(key).next)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::OrderNode;
    use crate::store::{HeapStore, OrderPool};
    use crate::types::{Order, Side};

    fn create_test_node<S: OrderStore>(store: &mut S, id: u64, quantity: u64) -> OrderKey {
        let key = store.acquire();
        *store.node_mut(key) = OrderNode::new(Order::new(id, Side::Buy, 100, quantity));
        key
    }

    fn setup_three(
        store: &mut OrderPool,
        index: &mut OrderIndex,
    ) -> (PriceLevel, OrderKey, OrderKey, OrderKey) {
        let mut level = PriceLevel::new(100);
        let key1 = create_test_node(store, 1, 10);
        let key2 = create_test_node(store, 2, 20);
        let key3 = create_test_node(store, 3, 30);
        level.add(key1, store, index);
        level.add(key2, store, index);
        level.add(key3, store, index);
        (level, key1, key2, key3)
    }

    #[test]
    fn test_price_level_new() {
        let level = PriceLevel::new(100);

        assert_eq!(level.price, 100);
        assert_eq!(level.total_volume, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_add_links_fifo() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let (level, key1, key2, key3) = setup_three(&mut store, &mut index);

        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_volume, 60);
        assert_eq!(level.head, Some(key1));
        assert_eq!(level.tail, Some(key3));

        // key1 <-> key2 <-> key3
        assert_eq!(store.node(key1).prev, None);
        assert_eq!(store.node(key1).next, Some(key2));
        assert_eq!(store.node(key2).prev, Some(key1));
        assert_eq!(store.node(key2).next, Some(key3));
        assert_eq!(store.node(key3).prev, Some(key2));
        assert_eq!(store.node(key3).next, None);

        // Registered in the index
        assert_eq!(index.get(2), Some(key2));
        assert_eq!(index.len(), 3);

        let order: Vec<_> = level.keys(&store).collect();
        assert_eq!(order, vec![key1, key2, key3]);
    }

    #[test]
    fn test_price_level_remove_middle() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let (mut level, key1, key2, key3) = setup_three(&mut store, &mut index);

        assert_eq!(level.remove(2, &mut store, &mut index), Some(key2));

        assert_eq!(level.order_count, 2);
        assert_eq!(level.total_volume, 40);
        assert_eq!(store.node(key1).next, Some(key3));
        assert_eq!(store.node(key3).prev, Some(key1));
        assert!(store.node(key2).is_unlinked());
        assert!(!index.contains(2));
    }

    #[test]
    fn test_price_level_remove_head_and_tail() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let (mut level, _key1, key2, _key3) = setup_three(&mut store, &mut index);

        level.remove(1, &mut store, &mut index);
        level.remove(3, &mut store, &mut index);

        assert_eq!(level.head, Some(key2));
        assert_eq!(level.tail, Some(key2));
        assert!(store.node(key2).is_unlinked());
        assert_eq!(level.total_volume, 20);
    }

    #[test]
    fn test_price_level_remove_only() {
        let mut store = HeapStore::new();
        let mut index = OrderIndex::new();
        let mut level = PriceLevel::new(100);

        let key = create_test_node(&mut store, 1, 10);
        level.add(key, &mut store, &mut index);
        level.remove(1, &mut store, &mut index);

        assert!(level.is_empty());
        assert_eq!(level.total_volume, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_price_level_remove_unknown_is_noop() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let (mut level, ..) = setup_three(&mut store, &mut index);

        assert_eq!(level.remove(99, &mut store, &mut index), None);
        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_volume, 60);
    }

    #[test]
    fn test_price_level_reduce_volume() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let (mut level, key1, ..) = setup_three(&mut store, &mut index);

        // Partial fill of the head
        store.node_mut(key1).fill(4);
        level.reduce_volume(4);
        assert_eq!(level.total_volume, 56);

        // Removing it subtracts only what is left
        level.remove(1, &mut store, &mut index);
        assert_eq!(level.total_volume, 50);
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn test_price_level_rejects_linked_node() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let (mut level, _key1, key2, _key3) = setup_three(&mut store, &mut index);

        level.add(key2, &mut store, &mut index);
    }

    #[test]
    #[should_panic(expected = "zero quantity")]
    fn test_price_level_rejects_empty_order() {
        let mut store = OrderPool::new(8);
        let mut index = OrderIndex::new();
        let mut level = PriceLevel::new(100);

        let key = create_test_node(&mut store, 1, 0);
        level.add(key, &mut store, &mut index);
    }
}
