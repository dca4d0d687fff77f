//! Order storage strategies.
//!
//! Every resting order lives in exactly one `OrderStore`; price levels and
//! the order index only hold `OrderKey` handles into it.
//!
//! | Store        | acquire             | release          |
//! |--------------|---------------------|------------------|
//! | [`HeapStore`] | one `Box` per order | drops the box    |
//! | [`OrderPool`] | pops the free-list  | pushes the slot  |
//!
//! Releasing a key twice is a caller error. `HeapStore` panics on it;
//! `OrderPool` only checks in debug builds.

mod heap;
mod pool;

pub use heap::HeapStore;
pub use pool::OrderPool;

use crate::config::BookConfig;
use crate::orderbook::{OrderKey, OrderNode};

/// Owner of order records, addressed by stable keys.
pub trait OrderStore {
    /// Hand out a record. Its contents are unspecified; the caller
    /// overwrites it (links included) before use.
    fn acquire(&mut self) -> OrderKey;

    /// Return a record obtained from `acquire`.
    fn release(&mut self, key: OrderKey);

    fn node(&self, key: OrderKey) -> &OrderNode;

    fn node_mut(&mut self, key: OrderKey) -> &mut OrderNode;

    /// Number of keys acquired and not yet released
    fn live(&self) -> usize;

    /// Records currently backed by memory
    fn capacity(&self) -> usize;
}

/// Stores that own their memory and can be built from a `BookConfig`.
pub trait FromConfig {
    fn from_config(config: &BookConfig) -> Self;
}

/// A book can run against a borrowed store.
impl<S: OrderStore> OrderStore for &mut S {
    #[inline]
    fn acquire(&mut self) -> OrderKey {
        (**self).acquire()
    }

    #[inline]
    fn release(&mut self, key: OrderKey) {
        (**self).release(key)
    }

    #[inline]
    fn node(&self, key: OrderKey) -> &OrderNode {
        (**self).node(key)
    }

    #[inline]
    fn node_mut(&mut self, key: OrderKey) -> &mut OrderNode {
        (**self).node_mut(key)
    }

    fn live(&self) -> usize {
        (**self).live()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}
