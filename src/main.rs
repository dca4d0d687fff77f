//! Ladder Book - Binary Entry Point
//!
//! Generates a deterministic workload, replays it into the chosen book
//! variant and prints throughput and the final state root.
//!
//! ```text
//! ladder-book --events 1000000 --ladder array --store pool --audit
//! ```

use anyhow::{bail, ensure, Context};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ladder_book::engine::{replay, workload, WARM_UP_ID_BASE};
use ladder_book::{
    ArrayLadder, BookConfig, Command, HeapStore, OrderBook, OrderPool, OrderStore, PriceLadder,
    TreeLadder, WorkloadConfig,
};
use ladder_book::store::FromConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LadderKind {
    /// Ordered map of levels
    Tree,
    /// Slot per price with a best-price cursor
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// One heap allocation per order
    Heap,
    /// Chunked pool with a free-list
    Pool,
}

#[derive(Parser, Debug)]
#[command(name = "ladder-book")]
#[command(version, about = "Replay a synthetic order flow through a limit order book", long_about = None)]
struct Cli {
    /// Number of generated events
    #[arg(short, long, default_value_t = workload::DEFAULT_EVENTS)]
    events: usize,

    /// Workload seed
    #[arg(short, long, default_value_t = workload::DEFAULT_SEED)]
    seed: u64,

    /// Fraction of events that cancel a live order
    #[arg(long, default_value_t = workload::DEFAULT_CANCEL_RATIO)]
    cancel_ratio: f64,

    /// Price ladder strategy
    #[arg(long, value_enum, default_value_t = LadderKind::Array)]
    ladder: LadderKind,

    /// Order store strategy
    #[arg(long, value_enum, default_value_t = StoreKind::Pool)]
    store: StoreKind,

    /// Exclusive upper bound on prices
    #[arg(long, default_value_t = ladder_book::config::DEFAULT_MAX_PRICE)]
    max_price: u64,

    /// Records per pool chunk
    #[arg(long, default_value_t = ladder_book::config::DEFAULT_POOL_CHUNK_SIZE)]
    chunk_size: usize,

    /// One-lot bids rested before the timed replay
    #[arg(long, default_value_t = 0)]
    warm_up: u64,

    /// Verify book invariants after the replay
    #[arg(long)]
    audit: bool,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides; info by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = BookConfig::default()
        .with_max_price(cli.max_price)
        .with_pool_chunk_size(cli.chunk_size);
    config.validate().context("invalid book config")?;

    let flow = WorkloadConfig::default()
        .with_events(cli.events)
        .with_cancel_ratio(cli.cancel_ratio)
        .with_seed(cli.seed);
    ensure!(
        config.contains_price(*flow.price_range.end()),
        "workload prices {:?} exceed --max-price {}",
        flow.price_range,
        cli.max_price
    );
    if cli.warm_up > 0 && cli.events as u64 >= WARM_UP_ID_BASE {
        bail!(
            "--events {} would reuse warm-up ids starting at {}",
            cli.events,
            WARM_UP_ID_BASE
        );
    }

    info!(events = cli.events, seed = cli.seed, "generating workload");
    let commands = workload::generate(&flow).context("invalid workload")?;

    info!(ladder = ?cli.ladder, store = ?cli.store, "replaying");
    match (cli.ladder, cli.store) {
        (LadderKind::Tree, StoreKind::Heap) => simulate::<TreeLadder, HeapStore>(&cli, config, &commands),
        (LadderKind::Tree, StoreKind::Pool) => simulate::<TreeLadder, OrderPool>(&cli, config, &commands),
        (LadderKind::Array, StoreKind::Heap) => simulate::<ArrayLadder, HeapStore>(&cli, config, &commands),
        (LadderKind::Array, StoreKind::Pool) => simulate::<ArrayLadder, OrderPool>(&cli, config, &commands),
    }
}

fn simulate<L, S>(cli: &Cli, config: BookConfig, commands: &[Command]) -> anyhow::Result<()>
where
    L: PriceLadder,
    S: OrderStore + FromConfig,
{
    let mut book: OrderBook<L, S> = OrderBook::new(config)?;
    replay::warm_up(&mut book, cli.warm_up);

    let report = replay::run(&mut book, commands);

    println!("\n=== RESULTS ({:?} ladder, {:?} store) ===", cli.ladder, cli.store);
    println!("{}", report);
    println!("  Bid levels:        {:>12}", book.bid_levels());
    println!("  Ask levels:        {:>12}", book.ask_levels());
    println!("  Store capacity:    {:>12}", book.store().capacity());

    if cli.audit {
        book.check_invariants().context("book audit failed")?;
        println!("\n  Audit:             {:>12}", "PASS");
    }

    Ok(())
}
