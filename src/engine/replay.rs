//! Timed replay of a command stream into a book.
//!
//! Only the dispatch loop is timed; generation and warm-up happen before
//! the clock starts.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::orderbook::{MatchResult, OrderBook, PriceLadder};
use crate::store::OrderStore;
use crate::types::{Command, Order, Side};

/// First order id used by [`warm_up`]. Workload ids stay below it.
pub const WARM_UP_ID_BASE: u64 = 10_000_000;

/// Price the warm-up bids rest at.
pub const WARM_UP_PRICE: u64 = 100;

/// Outcome of one applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Limit(MatchResult),
    Cancel(Option<Order>),
}

/// Dispatch one command.
#[inline]
pub fn apply<L: PriceLadder, S: OrderStore>(
    book: &mut OrderBook<L, S>,
    command: &Command,
) -> Applied {
    match *command {
        Command::Limit {
            id,
            side,
            price,
            quantity,
        } => Applied::Limit(book.limit_order(id, side, price, quantity)),
        Command::Cancel { id } => Applied::Cancel(book.cancel_order(id)),
    }
}

/// Rest `count` one-lot bids to touch the book's memory before timing.
///
/// Bids rest at [`WARM_UP_PRICE`], or the top of the domain if that is
/// lower, under ids starting at [`WARM_UP_ID_BASE`].
pub fn warm_up<L: PriceLadder, S: OrderStore>(book: &mut OrderBook<L, S>, count: u64) {
    let price = WARM_UP_PRICE.min(book.config().max_price - 1);
    for offset in 0..count {
        book.limit_order(WARM_UP_ID_BASE + offset, Side::Buy, price, 1);
    }
    debug!(count, price, "book warmed up");
}

/// Counters and timing from one [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Commands applied
    pub events: usize,

    /// Limit orders among them
    pub limits: usize,

    /// Cancels among them (including misses)
    pub cancels: usize,

    /// Trades emitted
    pub trades: u64,

    /// Wall time of the replay loop
    pub elapsed: Duration,

    /// Orders resting once the replay finished
    pub resting_orders: usize,

    /// Book fingerprint once the replay finished
    pub state_root: [u8; 32],
}

impl ReplayReport {
    /// Commands per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.events as f64 / secs
        } else {
            0.0
        }
    }

    /// Mean nanoseconds per command
    pub fn avg_latency_ns(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.elapsed.as_nanos() as f64 / self.events as f64
        }
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Events processed:  {:>12}", self.events)?;
        writeln!(f, "  Limit orders:      {:>12}", self.limits)?;
        writeln!(f, "  Cancels:           {:>12}", self.cancels)?;
        writeln!(f, "  Trades generated:  {:>12}", self.trades)?;
        writeln!(f, "  Final book size:   {:>12}", self.resting_orders)?;
        writeln!(f)?;
        writeln!(f, "  Elapsed time:      {:>12.2?}", self.elapsed)?;
        writeln!(f, "  Throughput:        {:>12.0} ops/sec", self.throughput())?;
        writeln!(f, "  Avg latency:       {:>12.1} ns/op", self.avg_latency_ns())?;
        write!(f, "  State root:        {}", self.state_root_hex())
    }
}

/// Apply `commands` in order and report.
pub fn run<L: PriceLadder, S: OrderStore>(
    book: &mut OrderBook<L, S>,
    commands: &[Command],
) -> ReplayReport {
    let mut limits = 0;
    let mut cancels = 0;
    let mut trades = 0u64;

    let start = Instant::now();
    for command in commands {
        match apply(book, command) {
            Applied::Limit(result) => {
                limits += 1;
                trades += u64::from(result.trade_count);
            }
            Applied::Cancel(_) => cancels += 1,
        }
    }
    let elapsed = start.elapsed();

    let report = ReplayReport {
        events: commands.len(),
        limits,
        cancels,
        trades,
        elapsed,
        resting_orders: book.order_count(),
        state_root: book.state_root(),
    };
    info!(
        events = report.events,
        trades = report.trades,
        resting = report.resting_orders,
        elapsed = ?report.elapsed,
        throughput = report.throughput() as u64,
        "replay finished"
    );

    report
}

// ============================================================================
// Unit Tests
// ============================================================================
