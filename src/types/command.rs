//! Order-entry commands replayed into a book.

use crate::types::Side;

/// One tagged order-entry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Submit a limit order
    Limit {
        id: u64,
        side: Side,
        price: u64,
        quantity: u64,
    },
    /// Cancel a resting order (no-op if unknown)
    Cancel { id: u64 },
}

impl Command {
    pub fn limit(id: u64, side: Side, price: u64, quantity: u64) -> Self {
        Command::Limit {
            id,
            side,
            price,
            quantity,
        }
    }

    pub fn cancel(id: u64) -> Self {
        Command::Cancel { id }
    }

    /// Order id the command refers to
    pub fn order_id(&self) -> u64 {
        match *self {
            Command::Limit { id, .. } | Command::Cancel { id } => id,
        }
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Command::Cancel { .. })
    }
}
