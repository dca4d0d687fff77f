//! Price ladders: the occupied price levels of one side, best first.
//!
//! Two interchangeable strategies implement [`PriceLadder`]:
//!
//! | Ladder          | Storage                     | best price      | insert/remove level |
//! |-----------------|-----------------------------|-----------------|---------------------|
//! | [`TreeLadder`]  | `BTreeMap`, side-ordered    | O(1) first key  | O(log P)            |
//! | [`ArrayLadder`] | slot per price + cursor     | O(1) amortized  | O(1)                |
//!
//! The tree suits unbounded or sparse prices; the array suits a small,
//! bounded price domain.
//!
//! Empty levels are never left in a ladder: the book removes a level the
//! moment its last order leaves.

mod array;
mod tree;

pub use array::ArrayLadder;
pub use tree::TreeLadder;

use crate::config::BookConfig;
use crate::orderbook::PriceLevel;
use crate::types::Side;

/// Ordered price levels for one side of the book.
pub trait PriceLadder {
    /// Build an empty ladder for `side` over `config`'s price domain.
    fn for_side(side: Side, config: &BookConfig) -> Self
    where
        Self: Sized;

    fn side(&self) -> Side;

    /// Best occupied price, advancing any internal cursor past empty
    /// slots. `None` when the side is empty.
    fn best_price(&mut self) -> Option<u64>;

    /// Best occupied price without moving any cursor.
    fn peek_best(&self) -> Option<u64>;

    fn level(&self, price: u64) -> Option<&PriceLevel>;

    fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel>;

    /// Level at `price`, creating an empty one if absent. Moves the best
    /// price to `price` if it improves on it.
    fn level_or_insert(&mut self, price: u64) -> &mut PriceLevel;

    /// Detach the level at `price`, re-pointing the best price if it was
    /// the best.
    fn remove_level(&mut self, price: u64) -> Option<PriceLevel>;

    /// Occupied levels, best to worst.
    fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_>;

    /// Number of occupied levels
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every level and reset the best price.
    fn clear(&mut self);
}
