//! Order book infrastructure module
//!
//! Contains price levels, the bid and ask side structures, and the
//! per-pair order book that ties them together.

pub mod ask_book;
pub mod bid_book;
pub mod order_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use order_book::OrderBook;
pub use price_level::PriceLevel;
