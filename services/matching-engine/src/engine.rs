//! Matching engine core
//!
//! Routes requests to per-pair order books. The engine owns a
//! concurrent registry of books plus a global order-id counter;
//! everything else (matching, cancellation, depth) lives inside the
//! books themselves, so pairs never contend with each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use types::errors::{EngineError, OrderError};
use types::ids::{MarketId, OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use crate::book::OrderBook;

/// Depth levels reported per side in a market data snapshot
const MARKET_DATA_DEPTH: usize = 10;

/// Top-of-book snapshot for one trading pair.
#[derive(Debug, Clone, Serialize)]
pub struct MarketData {
    pub market: MarketId,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// None unless both sides of the book are non-empty
    pub spread: Option<Decimal>,
    pub bid_depth: Vec<(Price, Quantity)>,
    pub ask_depth: Vec<(Price, Quantity)>,
}

/// Multi-pair matching engine.
///
/// Thread-safe by construction: the registry is a sharded concurrent
/// map, each book serializes its own operations, and ids come from an
/// atomic counter. Operations on different pairs run in parallel.
pub struct MatchingEngine {
    books: DashMap<MarketId, Arc<OrderBook>>,
    order_counter: AtomicU64,
}

impl MatchingEngine {
    /// Create an engine with no trading pairs
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            order_counter: AtomicU64::new(0),
        }
    }

    /// Register a trading pair.
    ///
    /// Returns false without touching the existing book if the pair is
    /// already registered.
    pub fn add_trading_pair(&self, market: MarketId) -> bool {
        match self.books.entry(market.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(OrderBook::new(market.clone())));
                info!(market = %market, "trading pair added");
                true
            }
        }
    }

    /// Validate and submit an order to its pair's book.
    ///
    /// Rejects non-positive quantity and, for LIMIT orders, a missing
    /// or non-positive price before any state changes. Returns the
    /// trades executed against the book.
    pub fn submit_order(
        &self,
        user_id: UserId,
        market: MarketId,
        side: Side,
        order_type: OrderType,
        price: Option<Decimal>,
        quantity: Decimal,
    ) -> Result<Vec<Trade>, EngineError> {
        let quantity = Quantity::try_new(quantity)
            .filter(|q| !q.is_zero())
            .ok_or(OrderError::InvalidQuantity(quantity))?;

        let price = match order_type {
            OrderType::LIMIT => {
                let raw = price.ok_or_else(|| {
                    OrderError::InvalidPrice("limit order requires a price".into())
                })?;
                Some(
                    Price::try_new(raw)
                        .ok_or_else(|| OrderError::InvalidPrice(raw.to_string()))?,
                )
            }
            OrderType::MARKET => None,
        };

        let book = self
            .book(&market)
            .ok_or_else(|| EngineError::MarketNotFound {
                symbol: market.to_string(),
            })?;

        let order_id = OrderId::new(self.order_counter.fetch_add(1, Ordering::Relaxed) + 1);
        let timestamp = now_nanos();
        let order = Order::new(
            order_id, user_id, market, side, order_type, price, quantity, timestamp,
        );

        let trades = book.add_order(order, timestamp)?;
        debug!(
            order_id = order_id.as_u64(),
            market = %book.market(),
            trades = trades.len(),
            "order submitted"
        );
        Ok(trades)
    }

    /// Cancel a resting order on the given pair.
    ///
    /// Returns false for unknown pairs, unknown ids and terminal orders.
    pub fn cancel_order(&self, market: &MarketId, order_id: OrderId) -> bool {
        let Some(book) = self.book(market) else {
            return false;
        };
        let cancelled = book.cancel_order(order_id);
        if cancelled {
            debug!(order_id = order_id.as_u64(), market = %market, "order cancelled");
        }
        cancelled
    }

    /// Snapshot best prices, spread and depth ladders for one pair
    pub fn market_data(&self, market: &MarketId) -> Result<MarketData, EngineError> {
        let book = self
            .book(market)
            .ok_or_else(|| EngineError::MarketNotFound {
                symbol: market.to_string(),
            })?;

        let best_bid = book.best_bid();
        let best_ask = book.best_ask();
        let spread = match (best_bid, best_ask) {
            (Some(bid), Some(ask)) => Some(ask.as_decimal() - bid.as_decimal()),
            _ => None,
        };

        Ok(MarketData {
            market: market.clone(),
            best_bid,
            best_ask,
            spread,
            bid_depth: book.bid_depth(MARKET_DATA_DEPTH),
            ask_depth: book.ask_depth(MARKET_DATA_DEPTH),
        })
    }

    /// All of a user's tracked orders on one pair.
    ///
    /// Unknown pairs yield an empty list rather than an error.
    pub fn user_orders(&self, market: &MarketId, user_id: &UserId) -> Vec<Order> {
        match self.book(market) {
            Some(book) => book.user_orders(user_id),
            None => Vec::new(),
        }
    }

    /// Count of orders accepted for matching since startup
    pub fn total_orders(&self) -> u64 {
        self.order_counter.load(Ordering::Relaxed)
    }

    /// Number of registered trading pairs
    pub fn trading_pair_count(&self) -> usize {
        self.books.len()
    }

    /// Clone the pair's book handle, releasing the registry shard
    /// before any book lock is taken.
    fn book(&self, market: &MarketId) -> Option<Arc<OrderBook>> {
        self.books.get(market).map(|entry| Arc::clone(entry.value()))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
