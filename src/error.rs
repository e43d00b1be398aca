//! Error handling for route discovery and pricing

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by snapshot validation and swap pricing.
///
/// Unreachable tokens, stale route segments and zero amounts are not errors:
/// they are reported through empty paths, shortened pair lists and zero estimates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Invalid token identifier: '{0}'")]
    InvalidTokenId(String),

    #[error("Pool pair {pair_id} trades {symbol} against itself")]
    SelfPair { pair_id: String, symbol: String },

    #[error("Pool pair {pair_id} has negative reserve {reserve} for {symbol}")]
    NegativeReserve {
        pair_id: String,
        symbol: String,
        reserve: Decimal,
    },

    #[error("Invalid input amount: '{0}'")]
    InvalidAmount(String),

    #[error("Slippage tolerance must be between 0 and 1, got {0}")]
    InvalidSlippage(Decimal),

    #[error("Decimal overflow while pricing hop {hop} of the route")]
    Overflow { hop: usize },

    #[error("Failed to parse pool pair snapshot: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, SwapError>;
