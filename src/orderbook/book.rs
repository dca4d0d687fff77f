//! The order book: two ladders, the order index and the order store.
//!
//! ## Architecture
//!
//! - **Store**: owns every order record ([`OrderStore`])
//! - **Ladders**: one per side, levels in priority order ([`PriceLadder`])
//! - **Index**: order id to store key, for O(1) cancel
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): best bid = highest price
//! - **Asks** (sell orders): best ask = lowest price
//!
//! Matching (`limit_order`, `cancel_order`) lives in `matching.rs`; state
//! fingerprinting and self-checks live in `audit.rs`.
//!
//! ## Example
//!
//! ```
//! use ladder_book::{BookConfig, PooledBook, Side};
//!
//! let mut book = PooledBook::new(BookConfig::default().with_max_price(1_000)).unwrap();
//!
//! book.limit_order(1, Side::Buy, 100, 10);
//! book.limit_order(2, Side::Sell, 101, 5);
//!
//! assert_eq!(book.best_bid(), Some(100));
//! assert_eq!(book.best_ask(), Some(101));
//! assert_eq!(book.spread(), Some(1));
//! ```

use crate::config::BookConfig;
use crate::error::Result;
use crate::orderbook::ladder::{ArrayLadder, PriceLadder};
use crate::orderbook::{OrderIndex, PriceLevel};
use crate::store::{FromConfig, OrderPool, OrderStore};
use crate::types::{Order, Side};

/// Single-instrument limit order book.
///
/// Generic over the ladder strategy `L` and the order store `S`; see
/// [`StandardBook`](crate::StandardBook) and
/// [`PooledBook`](crate::PooledBook) for the two stock deployments.
#[derive(Debug)]
pub struct OrderBook<L = ArrayLadder, S = OrderPool> {
    pub(crate) config: BookConfig,

    /// Bid levels (best = highest)
    pub(crate) bids: L,

    /// Ask levels (best = lowest)
    pub(crate) asks: L,

    /// Resting order id to store key
    pub(crate) index: OrderIndex,

    /// Order record storage
    pub(crate) store: S,

    /// Next trade sequence number
    pub(crate) next_trade_id: u64,

    /// Resting bid orders
    pub(crate) bid_count: usize,

    /// Resting ask orders
    pub(crate) ask_count: usize,
}

impl<L: PriceLadder, S: OrderStore + FromConfig> OrderBook<L, S> {
    /// Create an empty book that owns its store.
    ///
    /// # Errors
    ///
    /// Returns `BookError::InvalidConfig` if `config` fails validation.
    pub fn new(config: BookConfig) -> Result<Self> {
        config.validate()?;
        let store = S::from_config(&config);
        Ok(Self::assemble(config, store))
    }
}

impl<L: PriceLadder, S: OrderStore> OrderBook<L, S> {
    /// Create an empty book over a caller-supplied store, e.g. a
    /// `&mut OrderPool` reused by successive books.
    ///
    /// Dropping a book does not release its records; call [`clear`]
    /// first when the store outlives the book.
    ///
    /// ```
    /// use ladder_book::store::OrderStore;
    /// use ladder_book::{ArrayLadder, BookConfig, OrderBook, OrderPool, Side};
    ///
    /// let mut pool = OrderPool::new(1_024);
    /// {
    ///     let mut book: OrderBook<ArrayLadder, &mut OrderPool> =
    ///         OrderBook::with_store(BookConfig::default(), &mut pool).unwrap();
    ///     book.limit_order(1, Side::Buy, 100, 5);
    ///     assert_eq!(book.store().live(), 1);
    ///     book.clear();
    /// }
    /// assert_eq!(pool.live(), 0);
    /// ```
    ///
    /// [`clear`]: OrderBook::clear
    pub fn with_store(config: BookConfig, store: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, store))
    }

    fn assemble(config: BookConfig, store: S) -> Self {
        Self {
            bids: L::for_side(Side::Buy, &config),
            asks: L::for_side(Side::Sell, &config),
            index: OrderIndex::with_capacity(config.order_capacity),
            store,
            config,
            next_trade_id: 1,
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of occupied bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of occupied ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Trades executed over the book's lifetime
    #[inline]
    pub fn trades_executed(&self) -> u64 {
        self.next_trade_id - 1
    }

    // ========================================================================
    // Order Lookup
    // ========================================================================

    /// Resting order by id
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        let key = self.index.get(order_id)?;
        Some(&self.store.node(key).order)
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains(order_id)
    }

    /// Ids resting at `price` on `side`, in FIFO order
    pub fn orders_at(&self, side: Side, price: u64) -> Vec<u64> {
        self.ladder(side)
            .level(price)
            .map(|level| {
                level
                    .keys(&self.store)
                    .map(|key| self.store.node(key).order_id())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========================================================================
    // Best Bid/Ask and Depth
    // ========================================================================

    #[inline]
    pub fn ladder(&self, side: Side) -> &L {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.peek_best()
    }

    /// Lowest ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.peek_best()
    }

    /// `best_ask - best_bid`, or None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.levels().next()
    }

    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.asks.levels().next()
    }

    /// Resting volume at one price (0 if unoccupied)
    pub fn volume_at(&self, side: Side, price: u64) -> u64 {
        self.ladder(side)
            .level(price)
            .map_or(0, |level| level.total_volume)
    }

    /// Top `n` levels as `(price, volume)`, best first
    pub fn depth(&self, side: Side, n: usize) -> Vec<(u64, u64)> {
        self.ladder(side)
            .levels()
            .take(n)
            .map(|level| (level.price, level.total_volume))
            .collect()
    }

    /// Resting volume across every level of one side
    pub fn total_volume(&self, side: Side) -> u64 {
        self.ladder(side)
            .levels()
            .map(|level| level.total_volume)
            .sum()
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    /// Cancel everything, returning all records to the store.
    pub fn clear(&mut self) {
        for (_, key) in self.index.iter() {
            self.store.release(key);
        }
        self.index.clear();
        self.bids.clear();
        self.asks.clear();
        self.bid_count = 0;
        self.ask_count = 0;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
