//! Core data types for Ladder Book
//!
//! ## Types
//!
//! - [`Order`]: a limit order (resting or in flight)
//! - [`Side`]: Buy (bid) or Sell (ask)
//! - [`Trade`]: one execution between a taker and a maker
//! - [`Command`]: a place/cancel record fed to the book by a driver
//!
//! `Order` and `Trade` implement SSZ serialization for deterministic
//! encoding.

mod command;
mod order;
mod trade;

pub use command::Command;
pub use order::{Order, Side};
pub use trade::{Trade, TradeSink};
