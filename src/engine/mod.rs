//! Workload engine for Ladder Book.
//!
//! ## Components
//!
//! - [`workload`]: deterministic synthetic command streams
//! - [`replay`]: dispatch, warm-up and the timed replay loop
//!
//! ## Example
//!
//! ```
//! use ladder_book::engine::{replay, workload};
//! use ladder_book::{BookConfig, PooledBook, WorkloadConfig};
//!
//! let commands = workload::generate(&WorkloadConfig::default().with_events(10_000)).unwrap();
//!
//! let mut book = PooledBook::new(BookConfig::default()).unwrap();
//! let report = replay::run(&mut book, &commands);
//!
//! assert_eq!(report.events, 10_000);
//! assert!(book.check_invariants().is_ok());
//! ```

pub mod replay;
pub mod workload;

pub use replay::{apply, run, warm_up, Applied, ReplayReport, WARM_UP_ID_BASE};
pub use workload::{generate, WorkloadConfig};
