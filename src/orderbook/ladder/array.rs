//! Direct-indexed ladder over a bounded price domain.
//!
//! ## Layout
//!
//! One slot per price in `[0, max_price)`; the price is the slot index.
//! A slot holds a boxed level only while that price is occupied.
//!
//! ## Cursor
//!
//! `cursor` tracks the best occupied price:
//!
//! - **Bids**: highest price; stepping moves down
//! - **Asks**: lowest price; stepping moves up
//! - `None` is the sentinel "side empty" state (below the domain for bids,
//!   at `max_price` for asks)
//!
//! Invariant: no occupied slot is strictly better than the cursor. Inserts
//! pull the cursor forward; `best_price` lazily steps it over empty slots.
//! A single cold scan is O(domain) but a full run amortizes to O(1).
//!
//! Resting on one side never moves the other side's cursor. A resting
//! price is never marketable against the opposite best, so the opposite
//! cursor stays valid.

use tracing::debug;

use crate::config::BookConfig;
use crate::orderbook::{PriceLadder, PriceLevel};
use crate::types::Side;

/// Slot-array ladder with a lazily advanced best-price cursor.
#[derive(Debug, Clone)]
pub struct ArrayLadder {
    side: Side,
    slots: Vec<Option<Box<PriceLevel>>>,
    cursor: Option<u64>,
    occupied: usize,
}

impl ArrayLadder {
    /// Create a ladder for prices `[0, max_price)`.
    ///
    /// # Panics
    ///
    /// Panics if `max_price` is zero.
    pub fn new(side: Side, max_price: u64) -> Self {
        assert!(max_price > 0, "array ladder needs a non-empty price domain");
        Self {
            side,
            slots: (0..max_price).map(|_| None).collect(),
            cursor: None,
            occupied: 0,
        }
    }

    /// Exclusive upper bound of the price domain
    #[inline]
    pub fn max_price(&self) -> u64 {
        self.slots.len() as u64
    }

    /// Raw cursor position; `None` is the empty-side sentinel. May point
    /// at an empty slot until the next `best_price` call.
    #[inline]
    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    #[inline]
    fn is_occupied(&self, price: u64) -> bool {
        self.slots[price as usize].is_some()
    }

    /// One step away from the best end of the domain
    #[inline]
    fn step(&self, price: u64) -> Option<u64> {
        match self.side {
            Side::Buy => price.checked_sub(1),
            Side::Sell => Some(price + 1).filter(|&next| next < self.max_price()),
        }
    }

    /// First occupied price at or after `from`, walking away from the
    /// best end.
    fn scan_from(&self, from: Option<u64>) -> Option<u64> {
        if self.occupied == 0 {
            return None;
        }
        let mut price = from?;
        loop {
            if self.is_occupied(price) {
                return Some(price);
            }
            price = self.step(price)?;
        }
    }

    #[inline]
    fn assert_in_domain(&self, price: u64) {
        assert!(
            price < self.max_price(),
            "price {} outside domain [0, {})",
            price,
            self.max_price()
        );
    }
}

impl PriceLadder for ArrayLadder {
    fn for_side(side: Side, config: &BookConfig) -> Self {
        Self::new(side, config.max_price)
    }

    fn side(&self) -> Side {
        self.side
    }

    #[inline]
    fn best_price(&mut self) -> Option<u64> {
        self.cursor = self.scan_from(self.cursor);
        self.cursor
    }

    #[inline]
    fn peek_best(&self) -> Option<u64> {
        self.scan_from(self.cursor)
    }

    #[inline]
    fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.slots.get(price as usize)?.as_deref()
    }

    #[inline]
    fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        self.slots.get_mut(price as usize)?.as_deref_mut()
    }

    fn level_or_insert(&mut self, price: u64) -> &mut PriceLevel {
        self.assert_in_domain(price);

        let improves = match self.cursor {
            Some(cursor) => self.side.improves(price, cursor),
            None => true,
        };
        if improves {
            self.cursor = Some(price);
        }

        let slot = &mut self.slots[price as usize];
        if slot.is_none() {
            self.occupied += 1;
            debug!(side = ?self.side, price, "price level created");
        }
        slot.get_or_insert_with(|| Box::new(PriceLevel::new(price)))
    }

    fn remove_level(&mut self, price: u64) -> Option<PriceLevel> {
        let removed = self.slots.get_mut(price as usize)?.take()?;
        self.occupied -= 1;
        debug!(side = ?self.side, price, "price level removed");

        if self.cursor == Some(price) {
            self.best_price();
        }
        Some(*removed)
    }

    fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        let Some(best) = self.peek_best() else {
            return Box::new(std::iter::empty());
        };
        let prices: Box<dyn Iterator<Item = u64>> = match self.side {
            Side::Buy => Box::new((0..=best).rev()),
            Side::Sell => Box::new(best..self.max_price()),
        };
        Box::new(prices.filter_map(move |price| self.level(price)))
    }

    fn len(&self) -> usize {
        self.occupied
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = None;
        self.occupied = 0;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
