//! Order node held by the order store.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with doubly-linked list keys so a price
//! level can splice any member out in O(1).
//!
//! ## Keys, not pointers
//!
//! Links are `OrderKey`s (stable indices handed out by an `OrderStore`).
//! `None` plays the role of a null link. While a record sits on the pool's
//! free-list, `next` threads the free-list instead.
//!
//! ## Linked List
//!
//! Orders at the same price level form a doubly-linked list:
//! - `next`: the next (newer) order in the level
//! - `prev`: the previous (older) order in the level

use crate::types::Order;

/// Stable handle to a record inside an `OrderStore`.
pub type OrderKey = usize;

/// Order record plus its intrusive queue links.
#[derive(Debug, Clone, Default)]
pub struct OrderNode {
    /// The order data
    pub order: Order,

    /// Next order in the level queue; None at the tail
    pub next: Option<OrderKey>,

    /// Previous order in the level queue; None at the head
    pub prev: Option<OrderKey>,
}

impl OrderNode {
    /// Create an unlinked node
    ///
    /// ```
    /// use ladder_book::orderbook::OrderNode;
    /// use ladder_book::types::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new(1, Side::Buy, 100, 10));
    /// assert!(node.is_unlinked());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node is unlinked (not part of any multi-order queue)
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// Fill a portion of this order, returning the amount filled
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
