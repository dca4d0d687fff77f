//! Matching: `limit_order` and `cancel_order`.
//!
//! ## Matching Rules
//!
//! - **Buy orders** take asks priced at or below their limit, lowest first
//! - **Sell orders** take bids priced at or above their limit, highest first
//! - Within a level, the oldest order trades first
//! - Trades execute at the resting level's price
//! - Any unfilled remainder rests on the book at the order's limit
//!
//! Both sides run through one code path; `side` picks which ladder is
//! taken from and which one rests the remainder.

use tracing::trace;

use crate::error::{BookError, Result};
use crate::orderbook::{OrderBook, OrderNode, PriceLadder};
use crate::store::OrderStore;
use crate::types::{Order, Side, Trade, TradeSink};

/// Outcome of one `limit_order` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Incoming order id
    pub order_id: u64,

    /// Quantity traded against resting orders
    pub filled_quantity: u64,

    /// Quantity left resting on the book (0 if none)
    pub resting_quantity: u64,

    /// Number of trades emitted
    pub trade_count: u32,

    /// True if nothing was left to rest
    pub fully_filled: bool,
}

impl<L: PriceLadder, S: OrderStore> OrderBook<L, S> {
    /// Submit a limit order, discarding the individual trades.
    ///
    /// # Panics
    ///
    /// Panics if `price` is outside the configured domain, if `quantity`
    /// is zero, or if an order with `id` is already resting. Use
    /// [`try_limit_order`](Self::try_limit_order) for unchecked input.
    ///
    /// ## Example
    ///
    /// ```
    /// use ladder_book::{BookConfig, PooledBook, Side};
    ///
    /// let mut book = PooledBook::new(BookConfig::default()).unwrap();
    /// book.limit_order(1, Side::Buy, 100, 10);
    ///
    /// let result = book.limit_order(2, Side::Sell, 90, 4);
    /// assert!(result.fully_filled);
    /// assert_eq!(book.volume_at(Side::Buy, 100), 6);
    /// ```
    #[inline]
    pub fn limit_order(&mut self, id: u64, side: Side, price: u64, quantity: u64) -> MatchResult {
        self.limit_order_with(&mut (), id, side, price, quantity)
    }

    /// Submit a limit order, reporting every trade to `sink`.
    ///
    /// ```
    /// use ladder_book::{BookConfig, PooledBook, Side, Trade};
    ///
    /// let mut book = PooledBook::new(BookConfig::default()).unwrap();
    /// book.limit_order(1, Side::Sell, 100, 3);
    /// book.limit_order(2, Side::Sell, 101, 3);
    ///
    /// let mut trades: Vec<Trade> = Vec::new();
    /// book.limit_order_with(&mut trades, 3, Side::Buy, 101, 5);
    ///
    /// assert_eq!(trades.len(), 2);
    /// assert_eq!((trades[0].price, trades[0].quantity), (100, 3));
    /// assert_eq!((trades[1].price, trades[1].quantity), (101, 2));
    /// ```
    pub fn limit_order_with<T: TradeSink>(
        &mut self,
        sink: &mut T,
        id: u64,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> MatchResult {
        assert!(
            self.config.contains_price(price),
            "price {} outside domain [0, {})",
            price,
            self.config.max_price
        );
        assert!(quantity > 0, "order {} has zero quantity", id);
        assert!(!self.index.contains(id), "order {} is already resting", id);
        trace!(id, ?side, price, quantity, "limit order");

        let Self {
            bids,
            asks,
            index,
            store,
            next_trade_id,
            bid_count,
            ask_count,
            ..
        } = self;
        let (own, opposite, own_count, opposite_count) = match side {
            Side::Buy => (bids, asks, bid_count, ask_count),
            Side::Sell => (asks, bids, ask_count, bid_count),
        };

        let mut remaining = quantity;
        let mut trade_count = 0u32;

        // Walk the opposite side best-first while it is marketable
        while remaining > 0 {
            let Some(best) = opposite.best_price() else {
                break;
            };
            if !side.crosses(price, best) {
                break;
            }
            let level = opposite
                .level_mut(best)
                .expect("best price names an occupied level");

            // Consume the level in FIFO order
            while remaining > 0 {
                let Some(head) = level.peek_head() else {
                    break;
                };
                let maker = store.node_mut(head);
                let traded = maker.fill(remaining);
                let maker_id = maker.order_id();
                let maker_filled = maker.is_filled();

                level.reduce_volume(traded);
                remaining -= traded;

                let trade = Trade::new(*next_trade_id, maker_id, id, side, best, traded);
                *next_trade_id += 1;
                trade_count += 1;
                sink.on_trade(&trade);

                if maker_filled {
                    let key = level
                        .remove(maker_id, store, index)
                        .expect("resting order is indexed");
                    store.release(key);
                    *opposite_count -= 1;
                }
            }

            if level.is_empty() {
                opposite.remove_level(best);
            }
        }

        let resting_quantity = if remaining > 0 {
            let mut order = Order::new(id, side, price, quantity);
            order.remaining = remaining;

            let key = store.acquire();
            *store.node_mut(key) = OrderNode::new(order);
            own.level_or_insert(price).add(key, store, index);
            *own_count += 1;

            trace!(id, price, remaining, "order rested");
            remaining
        } else {
            0
        };

        MatchResult {
            order_id: id,
            filled_quantity: quantity - remaining,
            resting_quantity,
            trade_count,
            fully_filled: remaining == 0,
        }
    }

    /// Validate untrusted order-entry input, then submit it.
    ///
    /// # Errors
    ///
    /// - `PriceOutOfDomain` if `price >= max_price`
    /// - `ZeroQuantity` if `quantity == 0`
    /// - `DuplicateOrderId` if `id` is already resting
    ///
    /// The book is untouched when an error is returned.
    pub fn try_limit_order(
        &mut self,
        id: u64,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> Result<MatchResult> {
        if !self.config.contains_price(price) {
            return Err(BookError::PriceOutOfDomain {
                price,
                max_price: self.config.max_price,
            });
        }
        if quantity == 0 {
            return Err(BookError::ZeroQuantity(id));
        }
        if self.index.contains(id) {
            return Err(BookError::DuplicateOrderId(id));
        }
        Ok(self.limit_order(id, side, price, quantity))
    }

    /// Cancel a resting order.
    ///
    /// Unknown ids (never seen, already filled, already canceled) are a
    /// no-op and return `None`.
    ///
    /// ```
    /// use ladder_book::{BookConfig, PooledBook, Side};
    ///
    /// let mut book = PooledBook::new(BookConfig::default()).unwrap();
    /// book.limit_order(1, Side::Buy, 100, 5);
    ///
    /// assert_eq!(book.cancel_order(1).map(|order| order.remaining), Some(5));
    /// assert!(book.cancel_order(1).is_none());
    /// assert!(book.is_empty());
    /// ```
    pub fn cancel_order(&mut self, id: u64) -> Option<Order> {
        let key = self.index.get(id)?;
        let node = self.store.node(key);
        let side = node.order.side();
        let price = node.price();

        let (ladder, count) = match side {
            Side::Buy => (&mut self.bids, &mut self.bid_count),
            Side::Sell => (&mut self.asks, &mut self.ask_count),
        };
        let level = ladder
            .level_mut(price)
            .expect("indexed order has a price level");
        level.remove(id, &mut self.store, &mut self.index);
        if level.is_empty() {
            ladder.remove_level(price);
        }
        *count -= 1;

        let order = self.store.node(key).order.clone();
        self.store.release(key);
        trace!(id, ?side, price, remaining = order.remaining, "order canceled");

        Some(order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
