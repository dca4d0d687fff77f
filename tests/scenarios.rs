//! End-to-end matching scenarios, run against every ladder/store pairing.
//!
//! Each scenario is written once as a generic function and instantiated
//! for all four books by `for_each_book!`.

use ladder_book::store::FromConfig;
use ladder_book::{
    ArrayLadder, BookConfig, HeapStore, OrderBook, OrderPool, OrderStore, PooledBook, PriceLadder,
    Side, Trade, TreeLadder,
};

fn new_book<L: PriceLadder, S: OrderStore + FromConfig>() -> OrderBook<L, S> {
    OrderBook::new(BookConfig::default().with_max_price(1_000).with_pool_chunk_size(8))
        .expect("valid config")
}

macro_rules! for_each_book {
    ($($name:ident => $scenario:ident),* $(,)?) => {
        $(
            mod $name {
                use super::*;

                #[test]
                fn tree_heap() {
                    $scenario(new_book::<TreeLadder, HeapStore>());
                }

                #[test]
                fn tree_pool() {
                    $scenario(new_book::<TreeLadder, OrderPool>());
                }

                #[test]
                fn array_heap() {
                    $scenario(new_book::<ArrayLadder, HeapStore>());
                }

                #[test]
                fn array_pool() {
                    $scenario(new_book::<ArrayLadder, OrderPool>());
                }
            }
        )*
    };
}

// ============================================================================
// Scenarios
// ============================================================================

/// Bid 100x10, then ask 90x4: the ask trades at 100 and nothing rests.
fn partial_fill_of_bid<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    book.limit_order(1, Side::Buy, 100, 10);

    let mut trades = Vec::new();
    let result = book.limit_order_with(&mut trades, 2, Side::Sell, 90, 4);

    assert!(result.fully_filled);
    assert_eq!(trades, vec![Trade::new(1, 1, 2, Side::Sell, 100, 4)]);
    assert_eq!(book.best_bid(), Some(100));
    assert_eq!(book.volume_at(Side::Buy, 100), 6);
    assert!(book.best_ask().is_none());
    assert!(!book.contains_order(2));
    assert_eq!(book.check_invariants(), Ok(()));
}

/// Bid 100x5 twice, then ask 100x7: FIFO fills order 1 first.
fn fifo_within_level<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    book.limit_order(1, Side::Buy, 100, 5);
    book.limit_order(2, Side::Buy, 100, 5);

    let mut trades = Vec::new();
    book.limit_order_with(&mut trades, 3, Side::Sell, 100, 7);

    let fills: Vec<_> = trades.iter().map(|t| (t.maker_order_id, t.quantity)).collect();
    assert_eq!(fills, vec![(1, 5), (2, 2)]);
    assert!(!book.contains_order(1));
    assert_eq!(book.order(2).map(|o| o.remaining), Some(3));
    assert_eq!(book.orders_at(Side::Buy, 100), vec![2]);
    assert!(book.best_ask().is_none());
    assert_eq!(book.check_invariants(), Ok(()));
}

/// Bid 100x5, cancel it: the book is empty again.
fn cancel_only_order<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    let empty = book.state_root();
    book.limit_order(1, Side::Buy, 100, 5);

    let canceled = book.cancel_order(1).expect("resting");
    assert_eq!(canceled.remaining, 5);

    assert!(book.is_empty());
    assert!(book.best_bid().is_none());
    assert_eq!(book.bid_levels(), 0);
    assert_eq!(book.store().live(), 0);
    assert_eq!(book.state_root(), empty);
    assert_eq!(book.check_invariants(), Ok(()));
}

/// Cancel 999 on an empty book changes nothing.
fn cancel_unknown<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    let before = book.state_root();

    assert!(book.cancel_order(999).is_none());

    assert!(book.is_empty());
    assert_eq!(book.state_root(), before);
}

/// Cancel twice: the second is a no-op.
fn cancel_is_idempotent<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    book.limit_order(1, Side::Sell, 200, 5);
    book.limit_order(2, Side::Sell, 200, 5);

    assert!(book.cancel_order(1).is_some());
    let after_first = book.state_root();
    assert!(book.cancel_order(1).is_none());

    assert_eq!(book.state_root(), after_first);
    assert_eq!(book.volume_at(Side::Sell, 200), 5);
}

/// Best price first across levels, and trades execute at maker prices.
fn sweep_prefers_best_price<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    book.limit_order(1, Side::Buy, 98, 3);
    book.limit_order(2, Side::Buy, 100, 3);
    book.limit_order(3, Side::Buy, 99, 3);

    let mut trades = Vec::new();
    let result = book.limit_order_with(&mut trades, 4, Side::Sell, 99, 10);

    let fills: Vec<_> = trades.iter().map(|t| (t.maker_order_id, t.price)).collect();
    assert_eq!(fills, vec![(2, 100), (3, 99)]);
    assert_eq!(result.filled_quantity, 6);
    assert_eq!(result.resting_quantity, 4);

    // The remainder rests at 99 and the untouched bid at 98 stays below it
    assert_eq!(book.best_ask(), Some(99));
    assert_eq!(book.best_bid(), Some(98));
    assert_eq!(book.check_invariants(), Ok(()));
}

/// Emptying the best level moves best to the next one.
fn best_recovers_after_level_empties<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    book.limit_order(1, Side::Sell, 105, 2);
    book.limit_order(2, Side::Sell, 110, 2);

    book.limit_order(3, Side::Buy, 105, 2);
    assert_eq!(book.best_ask(), Some(110));

    book.cancel_order(2);
    assert!(book.best_ask().is_none());

    // A fresh, worse-than-before ask becomes the new best
    book.limit_order(4, Side::Sell, 120, 1);
    assert_eq!(book.best_ask(), Some(120));
    assert_eq!(book.check_invariants(), Ok(()));
}

/// Domain edges: price 0 and max_price - 1 both work.
fn domain_edges<L: PriceLadder, S: OrderStore>(mut book: OrderBook<L, S>) {
    book.limit_order(1, Side::Buy, 0, 1);
    book.limit_order(2, Side::Sell, 999, 1);
    assert_eq!(book.spread(), Some(999));

    book.limit_order(3, Side::Sell, 0, 1);
    assert!(book.best_bid().is_none());
    assert_eq!(book.best_ask(), Some(999));
    assert_eq!(book.check_invariants(), Ok(()));
}

for_each_book! {
    partial_fill => partial_fill_of_bid,
    fifo => fifo_within_level,
    cancel_only => cancel_only_order,
    cancel_missing => cancel_unknown,
    cancel_twice => cancel_is_idempotent,
    sweep => sweep_prefers_best_price,
    best_recovery => best_recovers_after_level_empties,
    edges => domain_edges,
}

// ============================================================================
// Array ladder cursor
// ============================================================================

#[test]
fn array_cursor_returns_to_sentinel_after_cancel() {
    let mut book = PooledBook::new(BookConfig::default()).unwrap();

    book.limit_order(1, Side::Buy, 100, 5);
    assert_eq!(book.ladder(Side::Buy).cursor(), Some(100));

    book.cancel_order(1);
    assert_eq!(book.ladder(Side::Buy).cursor(), None);
    assert_eq!(book.ladder(Side::Sell).cursor(), None);
}

#[test]
fn array_resting_never_moves_opposite_cursor() {
    let mut book = PooledBook::new(BookConfig::default()).unwrap();
    book.limit_order(1, Side::Sell, 105, 5);
    book.limit_order(2, Side::Buy, 100, 5);

    assert_eq!(book.ladder(Side::Sell).cursor(), Some(105));
    assert_eq!(book.ladder(Side::Buy).cursor(), Some(100));

    // Fill through the ask side; only the ask cursor moves
    book.limit_order(3, Side::Buy, 105, 5);
    assert_eq!(book.ladder(Side::Sell).cursor(), None);
    assert_eq!(book.ladder(Side::Buy).cursor(), Some(100));
}

#[test]
fn try_limit_order_reports_errors() {
    let mut book = PooledBook::new(BookConfig::default().with_max_price(500)).unwrap();

    let err = book.try_limit_order(1, Side::Buy, 500, 1).unwrap_err();
    assert_eq!(err.to_string(), "price 500 outside domain [0, 500)");
    assert!(book.is_empty());
}
