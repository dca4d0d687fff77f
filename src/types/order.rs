//! Order types for the Ladder Book matching engine.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so that the resting book
//! can be fingerprinted byte-for-byte (see `OrderBook::state_root`):
//! - Basic types (u64, u8): direct little-endian encoding
//! - Fixed-size composites: concatenated little-endian fields
//!
//! ## Prices
//!
//! Prices are integer ticks in `[0, max_price)`; the bound lives in
//! `BookConfig`, not here.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy (bid) or Sell (ask)
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Bid - resting buy interest
    #[default]
    Buy,
    /// Ask - resting sell interest
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Map the `isBid` flag used by order-entry drivers
    #[inline]
    pub fn from_is_bid(is_bid: bool) -> Self {
        if is_bid {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether an incoming order on this side with `limit` can trade
    /// against a resting opposite level at `resting`.
    ///
    /// ```
    /// use ladder_book::Side;
    ///
    /// assert!(Side::Buy.crosses(100, 99));
    /// assert!(Side::Buy.crosses(100, 100));
    /// assert!(!Side::Buy.crosses(100, 101));
    /// assert!(Side::Sell.crosses(100, 101));
    /// ```
    #[inline]
    pub fn crosses(self, limit: u64, resting: u64) -> bool {
        match self {
            Side::Buy => resting <= limit,
            Side::Sell => resting >= limit,
        }
    }

    /// Whether `candidate` is a strictly better price than `current`
    /// for resting interest on this side.
    #[inline]
    pub fn improves(self, candidate: u64, current: u64) -> bool {
        match self {
            Side::Buy => candidate > current,
            Side::Sell => candidate < current,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// ## SSZ Layout
///
/// Fixed-size container, 33 bytes: id (8) + side_raw (1) + price (8)
/// + quantity (8) + remaining (8).
///
/// ## Example
///
/// ```
/// use ladder_book::types::{Order, Side};
///
/// let order = Order::new(1, Side::Buy, 100, 10);
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.remaining, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Caller-assigned identifier, unique among resting orders
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in ticks
    pub price: u64,

    /// Quantity when the order rested
    pub quantity: u64,

    /// Unfilled quantity; positive while resting
    pub remaining: u64,
}

impl Order {
    /// Create an order with `remaining == quantity`
    pub fn new(id: u64, side: Side, price: u64, quantity: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Quantity traded since the order rested
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill up to `fill_qty`, returning the amount actually filled
    #[inline]
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
