//! Deterministic synthetic workloads.
//!
//! A workload is a flat `Vec<Command>` built up front so that generation
//! never shows up in replay timings. The same [`WorkloadConfig`] always
//! yields the same commands.
//!
//! ## Event Mix
//!
//! - With probability `cancel_ratio`, and only while the generator knows of
//!   a live id, cancel a uniformly chosen live id
//! - Otherwise place a new limit order: fresh id, fair-coin side, uniform
//!   price and quantity
//!
//! Live ids are tracked from the generator's point of view only. Orders
//! that fill during replay stay "live" here, so some cancels miss.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::error::{BookError, Result};
use crate::types::{Command, Side};

/// Default number of events
pub const DEFAULT_EVENTS: usize = 1_000_000;

/// Default fraction of events that are cancels
pub const DEFAULT_CANCEL_RATIO: f64 = 0.2;

/// Default workload seed
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for [`generate`].
///
/// ```
/// use ladder_book::engine::workload::{generate, WorkloadConfig};
///
/// let config = WorkloadConfig::default().with_events(1_000).with_seed(7);
/// let commands = generate(&config).unwrap();
///
/// assert_eq!(commands.len(), 1_000);
/// assert_eq!(commands, generate(&config).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    /// Number of commands to generate
    pub events: usize,

    /// Probability in `[0, 1]` that an event is a cancel
    pub cancel_ratio: f64,

    /// Limit prices, drawn uniformly
    pub price_range: RangeInclusive<u64>,

    /// Order quantities, drawn uniformly; must exclude zero
    pub quantity_range: RangeInclusive<u64>,

    /// ChaCha8 seed
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS,
            cancel_ratio: DEFAULT_CANCEL_RATIO,
            price_range: 90..=110,
            quantity_range: 1..=100,
            seed: DEFAULT_SEED,
        }
    }
}

impl WorkloadConfig {
    pub fn with_events(mut self, events: usize) -> Self {
        self.events = events;
        self
    }

    pub fn with_cancel_ratio(mut self, cancel_ratio: f64) -> Self {
        self.cancel_ratio = cancel_ratio;
        self
    }

    pub fn with_price_range(mut self, price_range: RangeInclusive<u64>) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn with_quantity_range(mut self, quantity_range: RangeInclusive<u64>) -> Self {
        self.quantity_range = quantity_range;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the config describes a generatable workload.
    ///
    /// # Errors
    ///
    /// Returns `BookError::InvalidWorkload` if `cancel_ratio` is outside
    /// `[0, 1]`, or if either range is empty, or if the quantity range
    /// admits zero.
    pub fn validate(&self) -> Result<()> {
        let problem = if !(0.0..=1.0).contains(&self.cancel_ratio) {
            Some(format!("cancel_ratio {} outside [0, 1]", self.cancel_ratio))
        } else if self.price_range.is_empty() {
            Some(format!("empty price range {:?}", self.price_range))
        } else if self.quantity_range.is_empty() {
            Some(format!("empty quantity range {:?}", self.quantity_range))
        } else if *self.quantity_range.start() == 0 {
            Some("quantity range includes zero".to_string())
        } else {
            None
        };

        match problem {
            Some(detail) => {
                warn!(%detail, "invalid workload config");
                Err(BookError::InvalidWorkload(detail))
            }
            None => Ok(()),
        }
    }
}

/// Generate the command stream for `config`.
///
/// # Errors
///
/// Returns `BookError::InvalidWorkload` if `config` fails validation.
pub fn generate(config: &WorkloadConfig) -> Result<Vec<Command>> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut commands = Vec::with_capacity(config.events);
    let mut live: Vec<u64> = Vec::new();
    let mut next_id = 1u64;

    for _ in 0..config.events {
        if !live.is_empty() && rng.gen_bool(config.cancel_ratio) {
            let slot = rng.gen_range(0..live.len());
            let id = live.swap_remove(slot);
            commands.push(Command::cancel(id));
        } else {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = rng.gen_range(config.price_range.clone());
            let quantity = rng.gen_range(config.quantity_range.clone());

            commands.push(Command::limit(next_id, side, price, quantity));
            live.push(next_id);
            next_id += 1;
        }
    }

    Ok(commands)
}

// ============================================================================
// Unit Tests
// ============================================================================
