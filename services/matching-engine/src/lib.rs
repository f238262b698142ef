//! Matching Engine
//!
//! Limit order book with continuous price-time priority matching.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced (better price first, FIFO at
//!   equal price)
//! - Execution price is always the resting order's price
//! - Conservation of quantity across fills
//! - Operations on different trading pairs never block each other

pub mod book;
pub mod engine;
pub mod matching;

pub use book::OrderBook;
pub use engine::{MarketData, MatchingEngine};
