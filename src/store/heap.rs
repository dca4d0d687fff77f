//! General-allocator order store.
//!
//! Every `acquire` boxes a fresh record and every `release` drops it, so
//! the hot path pays one allocation and one deallocation per order. The
//! slab only maps keys to boxes.
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`

use slab::Slab;

use crate::config::BookConfig;
use crate::orderbook::{OrderKey, OrderNode};
use crate::store::{FromConfig, OrderStore};

/// One heap allocation per order.
#[derive(Debug, Default)]
pub struct HeapStore {
    nodes: Slab<Box<OrderNode>>,
}

impl HeapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the key table (records are still boxed one at a time)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
        }
    }
}

impl FromConfig for HeapStore {
    fn from_config(config: &BookConfig) -> Self {
        Self::with_capacity(config.order_capacity)
    }
}

impl OrderStore for HeapStore {
    #[inline]
    fn acquire(&mut self) -> OrderKey {
        self.nodes.insert(Box::default())
    }

    /// # Panics
    ///
    /// Panics if `key` is not live (double release).
    #[inline]
    fn release(&mut self, key: OrderKey) {
        // Drops the box
        self.nodes.remove(key);
    }

    #[inline]
    fn node(&self, key: OrderKey) -> &OrderNode {
        &self.nodes[key]
    }

    #[inline]
    fn node_mut(&mut self, key: OrderKey) -> &mut OrderNode {
        &mut self.nodes[key]
    }

    fn live(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Order, Side};

    #[test]
    fn test_heap_acquire_release() {
        let mut store = HeapStore::new();

        let a = store.acquire();
        let b = store.acquire();
        assert_ne!(a, b);
        assert_eq!(store.live(), 2);

        *store.node_mut(a) = OrderNode::new(Order::new(1, Side::Buy, 100, 5));
        assert_eq!(store.node(a).order_id(), 1);

        store.release(a);
        assert_eq!(store.live(), 1);

        // Slab reuses the vacated key
        let c = store.acquire();
        assert_eq!(c, a);
        assert!(store.node(c).is_unlinked());
    }

    #[test]
    #[should_panic]
    fn test_heap_double_release_panics() {
        let mut store = HeapStore::new();
        let key = store.acquire();
        store.release(key);
        store.release(key);
    }
}
