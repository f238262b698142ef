//! Error types for the matching engine
//!
//! Invalid arguments and unknown markets surface as errors; expected
//! outcomes like cancelling an already-gone order or re-registering an
//! existing pair are boolean results, not errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Trading pair not found: {symbol}")]
    MarketNotFound { symbol: String },
}

/// Order validation errors
///
/// All are caller errors, rejected before any state mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(Decimal),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Order market {order} doesn't match book {book}")]
    MarketMismatch { order: String, book: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_display() {
        let err = OrderError::InvalidQuantity(Decimal::ZERO);
        assert_eq!(err.to_string(), "Invalid quantity: 0");

        let err = OrderError::InvalidPrice("-1.5".to_string());
        assert_eq!(err.to_string(), "Invalid price: -1.5");
    }

    #[test]
    fn test_market_not_found_display() {
        let err = EngineError::MarketNotFound {
            symbol: "DOGE/USDT".to_string(),
        };
        assert!(err.to_string().contains("DOGE/USDT"));
    }

    #[test]
    fn test_engine_error_from_order_error() {
        let order_err = OrderError::MarketMismatch {
            order: "ETH/USDT".to_string(),
            book: "BTC/USDT".to_string(),
        };
        let engine_err: EngineError = order_err.into();
        assert!(matches!(engine_err, EngineError::Order(_)));
    }
}
