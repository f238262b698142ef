//! Order book for a single trading pair
//!
//! Owns all resting liquidity for one market: a price-ordered bid side,
//! a price-ordered ask side, and an id index for O(1) cancellation.
//! Every public operation runs inside the book's single mutex, so
//! matching, insertion and cancellation are atomic with respect to each
//! other within one pair. Books for different pairs share nothing.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::warn;
use types::errors::OrderError;
use types::ids::{MarketId, OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use super::ask_book::AskBook;
use super::bid_book::BidBook;
use super::price_level::PriceLevel;
use crate::matching::crossing;

/// One pair's order book.
pub struct OrderBook {
    market: MarketId,
    inner: Mutex<BookInner>,
}

#[derive(Default)]
struct BookInner {
    bids: BidBook,
    asks: AskBook,
    /// Id index. Resting and filled orders stay here; cancelled orders
    /// are removed.
    orders: HashMap<OrderId, Order>,
}

impl OrderBook {
    /// Create an empty book for the given market
    pub fn new(market: MarketId) -> Self {
        Self {
            market,
            inner: Mutex::new(BookInner::default()),
        }
    }

    /// The trading pair this book serves
    pub fn market(&self) -> &MarketId {
        &self.market
    }

    /// Add an order, matching it against the opposite side.
    ///
    /// Returns the trades executed, in execution order. An unfilled
    /// LIMIT remainder rests at the back of its price level; a MARKET
    /// remainder never rests.
    pub fn add_order(&self, order: Order, timestamp: i64) -> Result<Vec<Trade>, OrderError> {
        if order.market != self.market {
            return Err(OrderError::MarketMismatch {
                order: order.market.to_string(),
                book: self.market.to_string(),
            });
        }

        let order_id = order.order_id;
        let mut inner = self.inner.lock();

        // Index before matching so the order is addressable for its
        // whole lifetime in the book.
        inner.orders.insert(order_id, order);

        let trades = inner.match_incoming(order_id, timestamp);
        inner.rest_remainder(order_id);

        Ok(trades)
    }

    /// Cancel a resting order by id.
    ///
    /// Returns false if the id is unknown or the order is already
    /// terminal; cancelling twice succeeds exactly once.
    pub fn cancel_order(&self, order_id: OrderId) -> bool {
        let mut inner = self.inner.lock();

        let (side, price) = match inner.orders.get(&order_id) {
            Some(order) if !order.status.is_terminal() => (order.side, order.price),
            _ => return false,
        };

        if let Some(price) = price {
            match side {
                Side::BUY => inner.bids.remove(price, &order_id),
                Side::SELL => inner.asks.remove(price, &order_id),
            };
        }

        inner.orders.remove(&order_id);
        true
    }

    /// Best bid price, or None when the bid side is empty
    pub fn best_bid(&self) -> Option<Price> {
        self.inner.lock().bids.best_price()
    }

    /// Best ask price, or None when the ask side is empty
    pub fn best_ask(&self) -> Option<Price> {
        self.inner.lock().asks.best_price()
    }

    /// Aggregated bid depth: up to `levels` price points, best first,
    /// each with the sum of resting remaining quantity at that price.
    pub fn bid_depth(&self, levels: usize) -> Vec<(Price, Quantity)> {
        let inner = self.inner.lock();
        inner
            .bids
            .levels()
            .take(levels)
            .map(|(price, level)| (price, inner.resting_quantity(level)))
            .collect()
    }

    /// Aggregated ask depth: up to `levels` price points, best first.
    pub fn ask_depth(&self, levels: usize) -> Vec<(Price, Quantity)> {
        let inner = self.inner.lock();
        inner
            .asks
            .levels()
            .take(levels)
            .map(|(price, level)| (price, inner.resting_quantity(level)))
            .collect()
    }

    /// All orders belonging to a user still tracked in the id index
    pub fn user_orders(&self, user_id: &UserId) -> Vec<Order> {
        let inner = self.inner.lock();
        inner
            .orders
            .values()
            .filter(|order| &order.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Look up a tracked order by id
    pub fn order(&self, order_id: &OrderId) -> Option<Order> {
        self.inner.lock().orders.get(order_id).cloned()
    }
}

impl BookInner {
    /// Match an incoming order against the opposite side.
    ///
    /// Consumes resting orders in strict price-then-time priority:
    /// better price first, FIFO within a level. Each trade executes at
    /// the resting order's price and updates both fill states.
    fn match_incoming(&mut self, incoming_id: OrderId, timestamp: i64) -> Vec<Trade> {
        let mut trades = Vec::new();

        let (side, order_type, limit_price) = match self.orders.get(&incoming_id) {
            Some(order) => (order.side, order.order_type, order.price),
            None => return trades,
        };

        loop {
            let remaining = match self.orders.get(&incoming_id) {
                Some(order) if !order.remaining_quantity.is_zero() => order.remaining_quantity,
                _ => break,
            };

            let best = match side {
                Side::BUY => self.asks.front_of_best(),
                Side::SELL => self.bids.front_of_best(),
            };
            let Some((level_price, resting_id)) = best else {
                break;
            };

            if !crossing::accepts(side, order_type, limit_price, level_price) {
                break;
            }

            let resting_remaining = match self.orders.get(&resting_id) {
                Some(order) => order.remaining_quantity,
                None => {
                    // Stale id; drop it and keep matching
                    self.pop_opposite_front(side);
                    continue;
                }
            };

            let match_quantity = remaining.min(resting_remaining);

            if let Some(order) = self.orders.get_mut(&incoming_id) {
                order.add_fill(match_quantity, timestamp);
            }
            let resting_filled = match self.orders.get_mut(&resting_id) {
                Some(order) => {
                    order.add_fill(match_quantity, timestamp);
                    order.is_filled()
                }
                None => false,
            };

            let (buy_order_id, sell_order_id) = match side {
                Side::BUY => (incoming_id, resting_id),
                Side::SELL => (resting_id, incoming_id),
            };
            trades.push(Trade::new(
                buy_order_id,
                sell_order_id,
                level_price,
                match_quantity,
                timestamp,
            ));

            if resting_filled {
                self.pop_opposite_front(side);
            }
        }

        trades
    }

    /// Remove the front order of the best opposite level.
    fn pop_opposite_front(&mut self, incoming_side: Side) {
        match incoming_side {
            Side::BUY => self.asks.pop_front_of_best(),
            Side::SELL => self.bids.pop_front_of_best(),
        };
    }

    /// Rest an unfilled LIMIT remainder at the back of its price level.
    ///
    /// A MARKET order that exhausted the opposite side keeps its fill
    /// state in the id index but never rests.
    fn rest_remainder(&mut self, order_id: OrderId) {
        let Some(order) = self.orders.get(&order_id) else {
            return;
        };
        if order.is_filled() {
            return;
        }

        match (order.order_type, order.price) {
            (OrderType::LIMIT, Some(price)) => match order.side {
                Side::BUY => self.bids.insert(price, order_id),
                Side::SELL => self.asks.insert(price, order_id),
            },
            _ => {
                warn!(
                    order_id = order_id.as_u64(),
                    remaining = %order.remaining_quantity,
                    "market order exhausted opposite side; remainder not rested"
                );
            }
        }
    }

    /// Exact sum of remaining quantity over a level's resting orders.
    fn resting_quantity(&self, level: &PriceLevel) -> Quantity {
        level
            .iter()
            .filter_map(|order_id| self.orders.get(order_id))
            .map(|order| order.remaining_quantity)
            .fold(Quantity::zero(), |total, quantity| total + quantity)
    }
}
