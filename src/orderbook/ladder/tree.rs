//! Ordered-map ladder.
//!
//! Levels live in a `BTreeMap` keyed so that iteration order is priority
//! order:
//!
//! - **Bids**: `Reverse(price)` - highest first
//! - **Asks**: `Reverse(-price)` - lowest first
//!
//! The best level is always the first entry.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::debug;

use crate::config::BookConfig;
use crate::orderbook::{PriceLadder, PriceLevel};
use crate::types::Side;

/// Key that sorts in the side's priority order.
type LadderKey = Reverse<i128>;

/// `BTreeMap`-backed ladder.
///
/// One key type serves both sides: `Reverse(price)` for bids and
/// `Reverse(-price)` for asks, so the map's first entry is always the
/// best level.
#[derive(Debug, Clone)]
pub struct TreeLadder {
    side: Side,
    levels: BTreeMap<LadderKey, PriceLevel>,
}

impl TreeLadder {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    #[inline]
    fn key(&self, price: u64) -> LadderKey {
        match self.side {
            Side::Buy => Reverse(price as i128),
            Side::Sell => Reverse(-(price as i128)),
        }
    }
}

impl PriceLadder for TreeLadder {
    fn for_side(side: Side, _config: &BookConfig) -> Self {
        Self::new(side)
    }

    fn side(&self) -> Side {
        self.side
    }

    #[inline]
    fn best_price(&mut self) -> Option<u64> {
        self.peek_best()
    }

    #[inline]
    fn peek_best(&self) -> Option<u64> {
        self.levels.values().next().map(|level| level.price)
    }

    #[inline]
    fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&self.key(price))
    }

    #[inline]
    fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        let key = self.key(price);
        self.levels.get_mut(&key)
    }

    fn level_or_insert(&mut self, price: u64) -> &mut PriceLevel {
        let key = self.key(price);
        let side = self.side;
        self.levels.entry(key).or_insert_with(|| {
            debug!(?side, price, "price level created");
            PriceLevel::new(price)
        })
    }

    fn remove_level(&mut self, price: u64) -> Option<PriceLevel> {
        let key = self.key(price);
        let removed = self.levels.remove(&key);
        if removed.is_some() {
            debug!(side = ?self.side, price, "price level removed");
        }
        removed
    }

    fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        Box::new(self.levels.values())
    }

    fn len(&self) -> usize {
        self.levels.len()
    }

    fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
