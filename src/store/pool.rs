//! Chunked slab pool for order records.
//!
//! ## Layout
//!
//! ```text
//! chunk 0: [ 0 | 1 | 2 | ... | n-1 ]
//! chunk 1: [ n | n+1 | ...  | 2n-1 ]
//! ```
//!
//! A key is `chunk * chunk_size + slot`. Unused records are threaded into a
//! singly-linked free-list through their `next` link, so `acquire` and
//! `release` are a pop and a push.
//!
//! ## Growth
//!
//! When the free-list runs dry a new chunk of the same size is allocated,
//! pre-linked, and becomes the free-list head. Chunks are never compacted
//! or returned; they are all dropped with the pool.
//!
//! ## Contract
//!
//! `release` does not zero or validate the record, and releasing a key
//! twice corrupts the free-list. Debug builds track released slots and
//! panic on a double release; release builds skip the check.

use tracing::debug;

use crate::config::BookConfig;
use crate::orderbook::{OrderKey, OrderNode};
use crate::store::{FromConfig, OrderStore};

/// Fixed-size chunks of order records recycled through a free-list.
#[derive(Debug)]
pub struct OrderPool {
    /// All chunks, each exactly `chunk_size` records
    chunks: Vec<Box<[OrderNode]>>,

    /// Records per chunk
    chunk_size: usize,

    /// Head of the free-list
    free_head: Option<OrderKey>,

    /// Keys acquired and not yet released
    live: usize,

    /// Per-key "currently free" marks, for double-release detection
    #[cfg(debug_assertions)]
    free_marks: Vec<bool>,
}

impl OrderPool {
    /// Create a pool and eagerly allocate its first chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// ```
    /// use ladder_book::store::{OrderPool, OrderStore};
    ///
    /// let mut pool = OrderPool::new(4);
    /// assert_eq!(pool.capacity(), 4);
    ///
    /// let key = pool.acquire();
    /// assert_eq!(pool.live(), 1);
    /// pool.release(key);
    /// assert_eq!(pool.live(), 0);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "pool chunk size must be positive");

        let mut pool = Self {
            chunks: Vec::new(),
            chunk_size,
            free_head: None,
            live: 0,
            #[cfg(debug_assertions)]
            free_marks: Vec::new(),
        };
        pool.allocate_chunk();
        pool
    }

    /// Records per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks allocated so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Allocate one chunk and push its records onto the free-list.
    fn allocate_chunk(&mut self) {
        let base = self
            .chunks
            .len()
            .checked_mul(self.chunk_size)
            .filter(|base| base.checked_add(self.chunk_size).is_some())
            .expect("order pool key space exhausted");
        let size = self.chunk_size;
        let old_head = self.free_head;

        // Record i links to i + 1; the last record links to the old head
        let chunk: Box<[OrderNode]> = (0..size)
            .map(|slot| OrderNode {
                next: if slot + 1 < size {
                    Some(base + slot + 1)
                } else {
                    old_head
                },
                ..OrderNode::default()
            })
            .collect();

        self.chunks.push(chunk);
        self.free_head = Some(base);

        #[cfg(debug_assertions)]
        self.free_marks.resize(base + size, true);

        debug!(
            chunk = self.chunks.len() - 1,
            chunk_size = size,
            capacity = self.capacity(),
            "order pool grew"
        );
    }

    #[inline]
    fn locate(&self, key: OrderKey) -> (usize, usize) {
        (key / self.chunk_size, key % self.chunk_size)
    }
}

impl FromConfig for OrderPool {
    fn from_config(config: &BookConfig) -> Self {
        Self::new(config.pool_chunk_size)
    }
}

impl OrderStore for OrderPool {
    #[inline]
    fn acquire(&mut self) -> OrderKey {
        if self.free_head.is_none() {
            self.allocate_chunk();
        }
        let key = self.free_head.expect("fresh chunk always refills the free-list");
        self.free_head = self.node(key).next;
        self.live += 1;

        #[cfg(debug_assertions)]
        {
            debug_assert!(self.free_marks[key], "free-list handed out live key {}", key);
            self.free_marks[key] = false;
        }

        key
    }

    #[inline]
    fn release(&mut self, key: OrderKey) {
        #[cfg(debug_assertions)]
        {
            assert!(
                key < self.free_marks.len(),
                "released key {} was never handed out",
                key
            );
            assert!(!self.free_marks[key], "double release of pool key {}", key);
            self.free_marks[key] = true;
        }

        let head = self.free_head;
        self.node_mut(key).next = head;
        self.free_head = Some(key);
        self.live -= 1;
    }

    #[inline]
    fn node(&self, key: OrderKey) -> &OrderNode {
        let (chunk, slot) = self.locate(key);
        &self.chunks[chunk][slot]
    }

    #[inline]
    fn node_mut(&mut self, key: OrderKey) -> &mut OrderNode {
        let (chunk, slot) = self.locate(key);
        &mut self.chunks[chunk][slot]
    }

    fn live(&self) -> usize {
        self.live
    }

    fn capacity(&self) -> usize {
        self.chunks.len() * self.chunk_size
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
