//! Order book module for the Ladder Book matching engine.
//!
//! ## Architecture
//!
//! The book is a Central Limit Order Book with pluggable internals:
//!
//! - **Order store**: owns every resting record behind a stable key
//! - **Price ladders**: occupied levels per side, best first
//! - **Price levels**: FIFO queues threaded through the store
//! - **Order index**: id to key, for O(1) cancel
//!
//! ## Components
//!
//! - [`OrderNode`]: an `Order` plus its queue links
//! - [`PriceLevel`]: the queue of orders at a single price
//! - [`PriceLadder`]: [`TreeLadder`] or [`ArrayLadder`]
//! - [`OrderBook`]: bid/ask ladders, index and store
//!
//! ## Performance
//!
//! | Operation         | TreeLadder   | ArrayLadder      |
//! |-------------------|--------------|------------------|
//! | Rest order        | O(log P)     | O(1)             |
//! | Cancel by id      | O(log P)     | O(1)             |
//! | Best bid/ask      | O(1)         | O(1) amortized   |
//! | Match, k fills    | O(k log P)   | O(k) amortized   |
//!
//! P is the number of occupied price levels on a side.
//!
//! ## Example
//!
//! ```
//! use ladder_book::{BookConfig, StandardBook, Side};
//!
//! let mut book = StandardBook::new(BookConfig::default()).unwrap();
//!
//! book.limit_order(1, Side::Buy, 100, 5);
//! assert_eq!(book.best_bid(), Some(100));
//! ```

pub mod audit;
pub mod book;
pub mod index;
pub mod ladder;
pub mod level;
pub mod matching;
pub mod node;

pub use book::OrderBook;
pub use index::OrderIndex;
pub use ladder::{ArrayLadder, PriceLadder, TreeLadder};
pub use level::PriceLevel;
pub use matching::MatchResult;
pub use node::{OrderKey, OrderNode};

use crate::store::{HeapStore, OrderPool};

/// Ordered-map ladder over heap-allocated records.
pub type StandardBook = OrderBook<TreeLadder, HeapStore>;

/// Direct-indexed ladder over pooled records.
pub type PooledBook = OrderBook<ArrayLadder, OrderPool>;
