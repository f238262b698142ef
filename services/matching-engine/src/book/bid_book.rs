//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap keyed by exact decimal price for deterministic iteration.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Bid (buy) side of the book.
///
/// The highest price is the best bid. At each price level, orders are
/// maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order at the back of its price level's queue
    pub fn insert(&mut self, price: Price, order_id: OrderId) {
        self.levels.entry(price).or_default().push_back(order_id);
    }

    /// Remove an order from its price level
    ///
    /// Returns true if the order was found; an emptied level is dropped.
    pub fn remove(&mut self, price: Price, order_id: &OrderId) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(order_id) {
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Get the best bid price (highest)
    pub fn best_price(&self) -> Option<Price> {
        // BTreeMap iterates ascending, so the best bid is last
        self.levels.keys().next_back().copied()
    }

    /// Price and front order id of the best level
    pub fn front_of_best(&self) -> Option<(Price, OrderId)> {
        let (price, level) = self.levels.iter().next_back()?;
        level.front().map(|order_id| (*price, order_id))
    }

    /// Pop the front order of the best level, dropping the level if emptied
    pub fn pop_front_of_best(&mut self) -> Option<OrderId> {
        let (price, level) = self.levels.iter_mut().next_back()?;
        let price = *price;
        let order_id = level.pop_front();
        if level.is_empty() {
            self.levels.remove(&price);
        }
        order_id
    }

    /// Iterate over price levels best-first (descending price)
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
