//! Matching logic module
//!
//! Price acceptance rules for the price-time priority matching loop.

pub mod crossing;

pub use crossing::accepts;
