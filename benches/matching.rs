//! Benchmarks for the Ladder Book order book.
//!
//! Every group runs the same operations against each ladder/store pairing:
//!
//! | Variant       | Ladder        | Store       |
//! |---------------|---------------|-------------|
//! | `tree_heap`   | `TreeLadder`  | `HeapStore` |
//! | `tree_pool`   | `TreeLadder`  | `OrderPool` |
//! | `array_heap`  | `ArrayLadder` | `HeapStore` |
//! | `array_pool`  | `ArrayLadder` | `OrderPool` |
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- replay
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use ladder_book::engine::{replay, workload};
use ladder_book::store::FromConfig;
use ladder_book::{
    ArrayLadder, BookConfig, Command, HeapStore, OrderBook, OrderPool, OrderStore, PriceLadder,
    Side, TreeLadder, WorkloadConfig,
};

// ============================================================================
// HELPER FUNCTIONS - Deterministic book setup
// ============================================================================

fn config() -> BookConfig {
    BookConfig::default().with_max_price(10_000).with_pool_chunk_size(16_384)
}

fn new_book<L: PriceLadder, S: OrderStore + FromConfig>() -> OrderBook<L, S> {
    OrderBook::new(config()).expect("benchmark config is valid")
}

/// Rest `count` asks, one per price from `base_price` upward.
fn populate_asks<L: PriceLadder, S: OrderStore>(
    book: &mut OrderBook<L, S>,
    count: u64,
    base_price: u64,
    quantity: u64,
) {
    for i in 0..count {
        book.limit_order(1_000_000 + i, Side::Sell, base_price + i, quantity);
    }
}

/// Rest `count` bids, one per price from `base_price` downward.
fn populate_bids<L: PriceLadder, S: OrderStore>(
    book: &mut OrderBook<L, S>,
    count: u64,
    base_price: u64,
    quantity: u64,
) {
    for i in 0..count {
        book.limit_order(2_000_000 + i, Side::Buy, base_price - i, quantity);
    }
}

fn commands(events: usize, seed: u64) -> Vec<Command> {
    let config = WorkloadConfig::default().with_events(events).with_seed(seed);
    workload::generate(&config).expect("default workload is valid")
}

// ============================================================================
// BENCHMARK: Single Operations
// ============================================================================

fn single_ops<L: PriceLadder, S: OrderStore + FromConfig>(c: &mut Criterion, variant: &str) {
    let mut group = c.benchmark_group(format!("single_ops/{}", variant));
    group.measurement_time(Duration::from_secs(5));

    // Rest below the best ask on a 1k-level book
    group.bench_function("rest_no_match", |b| {
        b.iter_batched(
            || {
                let mut book = new_book::<L, S>();
                populate_asks(&mut book, 1_000, 5_000, 10);
                book
            },
            |mut book| black_box(book.limit_order(1, Side::Buy, 4_000, 10)),
            BatchSize::LargeInput,
        );
    });

    // Sweep ten ask levels
    group.bench_function("sweep_10_levels", |b| {
        b.iter_batched(
            || {
                let mut book = new_book::<L, S>();
                populate_asks(&mut book, 100, 5_000, 10);
                book
            },
            |mut book| black_box(book.limit_order(1, Side::Buy, 5_100, 100)),
            BatchSize::LargeInput,
        );
    });

    // Cancel from the middle of a 1k-level book
    group.bench_function("cancel_middle", |b| {
        b.iter_batched(
            || {
                let mut book = new_book::<L, S>();
                populate_bids(&mut book, 1_000, 5_000, 10);
                book
            },
            |mut book| black_box(book.cancel_order(2_000_500)),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Replay Throughput
// ============================================================================

fn replay_throughput<L: PriceLadder, S: OrderStore + FromConfig>(c: &mut Criterion, variant: &str) {
    let mut group = c.benchmark_group(format!("replay/{}", variant));
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(30);

    for events in [10_000usize, 100_000] {
        let commands = commands(events, 42);
        group.throughput(Throughput::Elements(events as u64));
        group.bench_with_input(BenchmarkId::new("events", events), &commands, |b, commands| {
            b.iter_batched(
                new_book::<L, S>,
                |mut book| {
                    for command in commands {
                        black_box(replay::apply(&mut book, command));
                    }
                    book.order_count()
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Steady State
// ============================================================================

/// Keep one book alive and cycle a place/cross pair through it, so the
/// store recycles the same records every iteration.
fn steady_state<L: PriceLadder, S: OrderStore + FromConfig>(c: &mut Criterion, variant: &str) {
    let mut group = c.benchmark_group(format!("steady_state/{}", variant));
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("place_and_cross", |b| {
        let mut book = new_book::<L, S>();
        populate_bids(&mut book, 500, 4_999, 10);
        populate_asks(&mut book, 500, 5_001, 10);

        b.iter(|| {
            book.limit_order(1, Side::Buy, 5_000, 5);
            black_box(book.limit_order(2, Side::Sell, 5_000, 5))
        });
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

fn bench_single_ops(c: &mut Criterion) {
    single_ops::<TreeLadder, HeapStore>(c, "tree_heap");
    single_ops::<TreeLadder, OrderPool>(c, "tree_pool");
    single_ops::<ArrayLadder, HeapStore>(c, "array_heap");
    single_ops::<ArrayLadder, OrderPool>(c, "array_pool");
}

fn bench_replay(c: &mut Criterion) {
    replay_throughput::<TreeLadder, HeapStore>(c, "tree_heap");
    replay_throughput::<TreeLadder, OrderPool>(c, "tree_pool");
    replay_throughput::<ArrayLadder, HeapStore>(c, "array_heap");
    replay_throughput::<ArrayLadder, OrderPool>(c, "array_pool");
}

fn bench_steady_state(c: &mut Criterion) {
    steady_state::<TreeLadder, HeapStore>(c, "tree_heap");
    steady_state::<ArrayLadder, OrderPool>(c, "array_pool");
}

criterion_group!(benches, bench_single_ops, bench_replay, bench_steady_state);

criterion_main!(benches);
