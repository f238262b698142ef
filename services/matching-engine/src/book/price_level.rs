//! Price level implementation with FIFO queue
//!
//! A price level holds the ids of all orders resting at one price, in
//! strict arrival order. The orders themselves live in the book's id
//! index; keeping only ids here means every order has exactly one owner.

use std::collections::VecDeque;
use types::ids::OrderId;

/// FIFO queue of resting orders at a single price.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    queue: VecDeque<OrderId>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Append an order at the back of the queue (time priority)
    pub fn push_back(&mut self, order_id: OrderId) {
        self.queue.push_back(order_id);
    }

    /// Peek at the front order without removing it
    pub fn front(&self) -> Option<OrderId> {
        self.queue.front().copied()
    }

    /// Pop the front order from the queue
    pub fn pop_front(&mut self) -> Option<OrderId> {
        self.queue.pop_front()
    }

    /// Remove an order from anywhere in the queue
    ///
    /// Returns true if the order was present.
    pub fn remove(&mut self, order_id: &OrderId) -> bool {
        match self.queue.iter().position(|id| id == order_id) {
            Some(position) => {
                self.queue.remove(position);
                true
            }
            None => false,
        }
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.queue.len()
    }

    /// Iterate over resting order ids in FIFO order
    pub fn iter(&self) -> impl Iterator<Item = &OrderId> {
        self.queue.iter()
    }
}
