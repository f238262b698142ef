//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap keyed by exact decimal price for deterministic iteration.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Ask (sell) side of the book.
///
/// The lowest price is the best ask. At each price level, orders are
/// maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
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

    /// Get the best ask price (lowest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Price and front order id of the best level
    pub fn front_of_best(&self) -> Option<(Price, OrderId)> {
        let (price, level) = self.levels.iter().next()?;
        level.front().map(|order_id| (*price, order_id))
    }

    /// Pop the front order of the best level, dropping the level if emptied
    pub fn pop_front_of_best(&mut self) -> Option<OrderId> {
        let (price, level) = self.levels.iter_mut().next()?;
        let price = *price;
        let order_id = level.pop_front();
        if level.is_empty() {
            self.levels.remove(&price);
        }
        order_id
    }

    /// Iterate over price levels best-first (ascending price)
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_book_best_is_lowest() {
        let mut book = AskBook::new();

        book.insert(Price::from_u64(2010), OrderId::new(1));
        book.insert(Price::from_u64(2000), OrderId::new(2));
        book.insert(Price::from_u64(2020), OrderId::new(3));

        assert_eq!(book.best_price(), Some(Price::from_u64(2000)));
        assert_eq!(book.front_of_best(), Some((Price::from_u64(2000), OrderId::new(2))));
    }

    #[test]
    fn test_ask_book_remove_drops_empty_level() {
        let mut book = AskBook::new();
        let price = Price::from_u64(2010);

        book.insert(price, OrderId::new(1));
        book.insert(price, OrderId::new(2));

        assert!(book.remove(price, &OrderId::new(1)));
        assert_eq!(book.level_count(), 1);

        assert!(book.remove(price, &OrderId::new(2)));
        assert!(book.is_empty());
    }

    #[test]
    fn test_ask_book_pop_front_of_best() {
        let mut book = AskBook::new();

        book.insert(Price::from_u64(2010), OrderId::new(1));
        book.insert(Price::from_u64(2000), OrderId::new(2));

        // Best level (2000) drains first
        assert_eq!(book.pop_front_of_best(), Some(OrderId::new(2)));
        assert_eq!(book.best_price(), Some(Price::from_u64(2010)));
    }

    #[test]
    fn test_ask_book_levels_ascending() {
        let mut book = AskBook::new();

        book.insert(Price::from_u64(2020), OrderId::new(1));
        book.insert(Price::from_u64(2000), OrderId::new(2));
        book.insert(Price::from_u64(2010), OrderId::new(3));

        let prices: Vec<Price> = book.levels().map(|(price, _)| price).collect();
        assert_eq!(
            prices,
            vec![
                Price::from_u64(2000),
                Price::from_u64(2010),
                Price::from_u64(2020)
            ]
        );
    }
}
