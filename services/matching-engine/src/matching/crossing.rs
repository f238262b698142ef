//! Crossing detection logic
//!
//! Determines whether an incoming order accepts the best opposite price
//! level. Market orders accept any price; limit orders stop once the
//! best opposite level is worse than their limit.

use types::numeric::Price;
use types::order::{OrderType, Side};

/// Check whether an incoming order crosses the given opposite level.
///
/// - BUY LIMIT crosses while `level_price <= limit`
/// - SELL LIMIT crosses while `level_price >= limit`
/// - MARKET always crosses
pub fn accepts(
    side: Side,
    order_type: OrderType,
    limit_price: Option<Price>,
    level_price: Price,
) -> bool {
    match order_type {
        OrderType::MARKET => true,
        OrderType::LIMIT => match (side, limit_price) {
            (Side::BUY, Some(limit)) => level_price <= limit,
            (Side::SELL, Some(limit)) => level_price >= limit,
            // A limit order without a price is rejected upstream
            (_, None) => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_buy_crosses_at_or_below_limit() {
        let limit = Some(Price::from_u64(2000));

        assert!(accepts(Side::BUY, OrderType::LIMIT, limit, Price::from_u64(1990)));
        assert!(accepts(Side::BUY, OrderType::LIMIT, limit, Price::from_u64(2000)));
        assert!(!accepts(Side::BUY, OrderType::LIMIT, limit, Price::from_u64(2010)));
    }

    #[test]
    fn test_limit_sell_crosses_at_or_above_limit() {
        let limit = Some(Price::from_u64(2000));

        assert!(accepts(Side::SELL, OrderType::LIMIT, limit, Price::from_u64(2010)));
        assert!(accepts(Side::SELL, OrderType::LIMIT, limit, Price::from_u64(2000)));
        assert!(!accepts(Side::SELL, OrderType::LIMIT, limit, Price::from_u64(1990)));
    }

    #[test]
    fn test_market_accepts_any_price() {
        assert!(accepts(Side::BUY, OrderType::MARKET, None, Price::from_u64(1)));
        assert!(accepts(Side::SELL, OrderType::MARKET, None, Price::from_u64(1_000_000)));
    }

    #[test]
    fn test_limit_without_price_never_crosses() {
        assert!(!accepts(Side::BUY, OrderType::LIMIT, None, Price::from_u64(2000)));
    }
}
