//! Trade type representing one execution between a taker and a maker.
//!
//! Trades are SSZ-serializable so a sequence of them can be hashed
//! deterministically alongside the book state.

use ssz_rs::prelude::*;

use crate::types::Side;

/// A single match between the incoming (taker) order and one resting
/// (maker) order.
///
/// The trade always executes at the maker's price.
///
/// ## Example
///
/// ```
/// use ladder_book::types::{Side, Trade};
///
/// let trade = Trade::new(1, 10, 11, Side::Sell, 100, 4);
/// assert_eq!(trade.taker_side(), Side::Sell);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Per-book execution sequence, starting at 1
    pub id: u64,

    /// Resting order id
    pub maker_order_id: u64,

    /// Incoming order id
    pub taker_order_id: u64,

    /// Side of the incoming order as u8 (0=Buy, 1=Sell)
    pub taker_side_raw: u8,

    /// Execution price (the maker's level)
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,
}

impl Trade {
    pub fn new(
        id: u64,
        maker_order_id: u64,
        taker_order_id: u64,
        taker_side: Side,
        price: u64,
        quantity: u64,
    ) -> Self {
        Self {
            id,
            maker_order_id,
            taker_order_id,
            taker_side_raw: taker_side.to_u8(),
            price,
            quantity,
        }
    }

    /// Side of the incoming order
    pub fn taker_side(&self) -> Side {
        Side::from_u8(self.taker_side_raw).unwrap_or(Side::Buy)
    }

    /// Side of the resting order
    pub fn maker_side(&self) -> Side {
        self.taker_side().opposite()
    }
}

/// Receiver for trades produced while matching.
///
/// `()` discards trades; `Vec<Trade>` collects them.
pub trait TradeSink {
    fn on_trade(&mut self, trade: &Trade);
}

impl TradeSink for () {
    #[inline]
    fn on_trade(&mut self, _trade: &Trade) {}
}

impl TradeSink for Vec<Trade> {
    #[inline]
    fn on_trade(&mut self, trade: &Trade) {
        self.push(trade.clone());
    }
}
