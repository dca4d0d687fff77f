//! # Ladder Book
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Side, Trade, Command)
//! - **Store**: Order record storage (slab-backed heap or chunked pool)
//! - **OrderBook**: Price ladders (ordered map or direct-indexed array)
//! - **Engine**: Synthetic workload generation and timed replay
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same command stream always yields the same book
//! 2. **Integer Prices**: Prices are ticks in a bounded domain `[0, max_price)`
//! 3. **Stable Keys**: Orders are addressed by store key, never by pointer
//! 4. **Synchronous Execution**: One caller, no locking in the hot path
//!
//! ## Strategies
//!
//! | Alias            | Ladder        | Store       |
//! |------------------|---------------|-------------|
//! | [`StandardBook`] | `TreeLadder`  | `HeapStore` |
//! | [`PooledBook`]   | `ArrayLadder` | `OrderPool` |
//!
//! Any ladder combines with any store through [`OrderBook<L, S>`]; all
//! combinations produce identical trades and identical state roots.
//!
//! ## Example
//!
//! ```
//! use ladder_book::{BookConfig, PooledBook, Side};
//!
//! let mut book = PooledBook::new(BookConfig::default()).unwrap();
//!
//! book.limit_order(1, Side::Sell, 101, 10);
//! let result = book.limit_order(2, Side::Buy, 101, 4);
//!
//! assert!(result.fully_filled);
//! assert_eq!(book.volume_at(Side::Sell, 101), 6);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Trade, Command
pub mod types;

/// Book and workload configuration
pub mod config;

/// Error types
pub mod error;

/// Order record storage: HeapStore, OrderPool
pub mod store;

/// Order book: ladders, levels and matching
pub mod orderbook;

/// Workload generation and replay
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use engine::{ReplayReport, WorkloadConfig};
pub use error::{BookError, Result};
pub use orderbook::{
    ArrayLadder, MatchResult, OrderBook, PooledBook, PriceLadder, StandardBook, TreeLadder,
};
pub use store::{HeapStore, OrderPool, OrderStore};
pub use types::{Command, Order, Side, Trade, TradeSink};
