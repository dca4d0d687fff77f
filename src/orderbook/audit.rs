//! State fingerprinting and structural self-checks.
//!
//! ## State Root
//!
//! SHA-256 over the resting book in priority order. For each side (bids,
//! then asks) the side byte is hashed, then for each level best to worst:
//!
//! 1. the SSZ encoding of every order in FIFO order
//! 2. the level's price and total volume, little-endian
//!
//! Books holding the same orders in the same queue positions hash equal,
//! regardless of ladder or store strategy. Record keys never enter the
//! hash.

use sha2::{Digest, Sha256};

use crate::error::{BookError, Result};
use crate::orderbook::{OrderBook, PriceLadder, PriceLevel};
use crate::store::OrderStore;
use crate::types::Side;

impl<L: PriceLadder, S: OrderStore> OrderBook<L, S> {
    /// SHA-256 fingerprint of the resting book.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for side in [Side::Buy, Side::Sell] {
            hasher.update([side.to_u8()]);
            for level in self.ladder(side).levels() {
                for key in level.keys(&self.store) {
                    let bytes = ssz_rs::serialize(&self.store.node(key).order)
                        .expect("fixed-size order always serializes");
                    hasher.update(&bytes);
                }
                hasher.update(level.price.to_le_bytes());
                hasher.update(level.total_volume.to_le_bytes());
            }
        }

        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }

    /// Verify the book's structural invariants.
    ///
    /// Checks, per side:
    /// - levels are non-empty, on the right side and strictly best-first
    /// - every level's FIFO chain is well linked and sums to its volume
    /// - every resting order is indexed under its own key
    /// - the ladder's best price is its first level
    ///
    /// and across the book: per-side counts, index size, store live count
    /// and no crossed market.
    ///
    /// # Errors
    ///
    /// Returns `BookError::Inconsistent` describing the first violation.
    pub fn check_invariants(&self) -> Result<()> {
        let bids = self.check_side(Side::Buy)?;
        let asks = self.check_side(Side::Sell)?;

        if bids != self.bid_count {
            return Err(BookError::inconsistent(
                Side::Buy,
                format!("counted {} orders, book says {}", bids, self.bid_count),
            ));
        }
        if asks != self.ask_count {
            return Err(BookError::inconsistent(
                Side::Sell,
                format!("counted {} orders, book says {}", asks, self.ask_count),
            ));
        }
        if bids + asks != self.index.len() {
            return Err(BookError::inconsistent(
                Side::Buy,
                format!(
                    "index holds {} ids but {} orders rest",
                    self.index.len(),
                    bids + asks
                ),
            ));
        }
        if self.store.live() != self.index.len() {
            return Err(BookError::inconsistent(
                Side::Buy,
                format!(
                    "store has {} live records but {} orders rest",
                    self.store.live(),
                    self.index.len()
                ),
            ));
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(BookError::inconsistent(
                    Side::Buy,
                    format!("crossed book: best bid {} >= best ask {}", bid, ask),
                ));
            }
        }

        Ok(())
    }

    /// Check one side and return its order count.
    fn check_side(&self, side: Side) -> Result<usize> {
        let ladder = self.ladder(side);
        let mut orders = 0;
        let mut levels = 0;
        let mut previous: Option<u64> = None;

        if ladder.side() != side {
            return Err(BookError::inconsistent(side, "ladder built for the other side"));
        }

        for level in ladder.levels() {
            if let Some(prev) = previous {
                if !side.improves(prev, level.price) {
                    return Err(BookError::inconsistent(
                        side,
                        format!("level {} out of order after {}", level.price, prev),
                    ));
                }
            } else if ladder.peek_best() != Some(level.price) {
                return Err(BookError::inconsistent(
                    side,
                    format!(
                        "best price {:?} is not first level {}",
                        ladder.peek_best(),
                        level.price
                    ),
                ));
            }
            previous = Some(level.price);

            orders += self.check_level(side, level)?;
            levels += 1;
        }

        if previous.is_none() && ladder.peek_best().is_some() {
            return Err(BookError::inconsistent(
                side,
                "best price reported on an empty side",
            ));
        }
        if levels != ladder.len() {
            return Err(BookError::inconsistent(
                side,
                format!("walked {} levels, ladder reports {}", levels, ladder.len()),
            ));
        }

        Ok(orders)
    }

    /// Check one level's queue and return its order count.
    fn check_level(&self, side: Side, level: &PriceLevel) -> Result<usize> {
        let price = level.price;
        if level.is_empty() {
            return Err(BookError::inconsistent(
                side,
                format!("empty level left at {}", price),
            ));
        }

        let mut count = 0;
        let mut volume = 0u64;
        let mut prev = None;
        let mut cursor = level.head;

        while let Some(key) = cursor {
            // A cycle would otherwise walk forever
            if count >= level.order_count {
                return Err(BookError::inconsistent(
                    side,
                    format!("level {} queue longer than its count", price),
                ));
            }

            let node = self.store.node(key);
            let order = &node.order;
            if node.prev != prev {
                return Err(BookError::inconsistent(
                    side,
                    format!("order {} has a broken back link", order.id),
                ));
            }
            if order.side() != side || order.price != price {
                return Err(BookError::inconsistent(
                    side,
                    format!("order {} filed at the wrong level {}", order.id, price),
                ));
            }
            if order.remaining == 0 || order.remaining > order.quantity {
                return Err(BookError::inconsistent(
                    side,
                    format!(
                        "order {} rests with remaining {} of {}",
                        order.id, order.remaining, order.quantity
                    ),
                ));
            }
            if self.index.get(order.id) != Some(key) {
                return Err(BookError::inconsistent(
                    side,
                    format!("order {} is not indexed under its record", order.id),
                ));
            }

            volume += order.remaining;
            count += 1;
            prev = Some(key);
            cursor = node.next;
        }

        if prev != level.tail {
            return Err(BookError::inconsistent(
                side,
                format!("level {} tail does not end its queue", price),
            ));
        }
        if count != level.order_count {
            return Err(BookError::inconsistent(
                side,
                format!(
                    "level {} holds {} orders, counts {}",
                    price, count, level.order_count
                ),
            ));
        }
        if volume != level.total_volume {
            return Err(BookError::inconsistent(
                side,
                format!(
                    "level {} volume {} != sum of remaining {}",
                    price, level.total_volume, volume
                ),
            ));
        }

        Ok(count)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
