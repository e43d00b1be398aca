//! Multi-hop price composition
//!
//! Rates compose multiplicatively along a route under the constant-product
//! assumption (fees ignored). All arithmetic stays in `Decimal`; only the
//! final values are rounded to `PRICE_DECIMALS`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::str::FromStr;

use crate::config::PRICE_DECIMALS;
use crate::error::{Result, SwapError};
use crate::pools::{PoolPair, PoolToken};

/// Compounded exchange rates and the estimated output for one input amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRates {
    /// Destination received per unit of source
    pub forward_rate: Decimal,
    /// Source received per unit of destination
    pub backward_rate: Decimal,
    /// Output for the input amount after the slippage correction
    pub estimated_output: Decimal,
}

impl PriceRates {
    /// Rates for an empty route
    pub fn identity() -> Self {
        Self {
            forward_rate: Decimal::ONE,
            backward_rate: Decimal::ONE,
            estimated_output: Decimal::ZERO,
        }
    }

    /// Lowest acceptable output once the user's slippage tolerance is applied
    pub fn minimum_received(&self, tolerance: Decimal) -> Result<Decimal> {
        if tolerance < Decimal::ZERO || tolerance > Decimal::ONE {
            return Err(SwapError::InvalidSlippage(tolerance));
        }

        let minimum = self.estimated_output * (Decimal::ONE - tolerance);
        Ok(minimum
            .round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::ToZero)
            .max(Decimal::ZERO))
    }
}

/// Price a route hop by hop.
///
/// Each pair is oriented against the running token (initially `source_symbol`);
/// the output of one hop is the input of the next. Slippage is modelled once,
/// against the first hop's input reserve only: `1 - amount / reserve_in`.
/// The estimate is clamped to zero when the amount reaches that reserve,
/// however far past it the amount goes.
pub fn compute_rate(source_symbol: &str, pairs: &[PoolPair], amount: Decimal) -> Result<PriceRates> {
    if pairs.is_empty() {
        return Ok(PriceRates::identity());
    }

    let mut first_reserve_in = Decimal::ZERO;
    let mut current = source_symbol;
    let mut forward = Decimal::ONE;
    let mut backward = Decimal::ONE;
    let mut estimated = amount;

    for (hop, pair) in pairs.iter().enumerate() {
        let (token_in, token_out) = orient(pair, current);
        if hop == 0 {
            first_reserve_in = token_in.reserve;
        }

        let hop_forward = ratio(token_out.reserve, token_in.reserve, hop)?;
        let hop_backward = ratio(token_in.reserve, token_out.reserve, hop)?;

        forward = forward
            .checked_mul(hop_forward)
            .ok_or(SwapError::Overflow { hop })?;
        backward = backward
            .checked_mul(hop_backward)
            .ok_or(SwapError::Overflow { hop })?;
        estimated = estimated
            .checked_mul(hop_forward)
            .ok_or(SwapError::Overflow { hop })?;

        tracing::trace!(
            "Hop {}: {} -> {} via pair {} at {}",
            hop,
            token_in.symbol,
            token_out.symbol,
            pair.id,
            hop_forward
        );

        current = token_out.symbol.as_str();
    }

    // The factor is at most one once positive, so the product cannot grow.
    let slippage = slippage_factor(amount, first_reserve_in);
    let estimated = if slippage <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        estimated.saturating_mul(slippage)
    };

    Ok(PriceRates {
        forward_rate: round_price(forward),
        backward_rate: round_price(backward),
        estimated_output: round_price(estimated),
    })
}

/// `1 - amount / reserve_in`; zero when the reserve is empty.
///
/// Negative results are left for the caller to clamp.
pub fn slippage_factor(amount: Decimal, reserve_in: Decimal) -> Decimal {
    if reserve_in.is_zero() {
        return Decimal::ZERO;
    }
    match amount.checked_div(reserve_in) {
        Some(share) => Decimal::ONE - share,
        None => Decimal::ZERO,
    }
}

/// Parse a user-typed input amount. Blank input means zero.
pub fn parse_input_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let amount =
        Decimal::from_str(trimmed).map_err(|_| SwapError::InvalidAmount(raw.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SwapError::InvalidAmount(raw.to_string()));
    }

    Ok(amount)
}

/// Round half-up to the smallest on-chain unit
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// (input side, output side) of a pair for the token being sold.
///
/// A pair that does not contain `current` (stale snapshot) is read as token_a -> token_b.
fn orient<'a>(pair: &'a PoolPair, current: &str) -> (&'a PoolToken, &'a PoolToken) {
    if pair.token_b.symbol == current {
        (&pair.token_b, &pair.token_a)
    } else {
        if pair.token_a.symbol != current {
            tracing::warn!(
                "Pair {} ({}) does not trade {}, reading it as {} -> {}",
                pair.id,
                pair.label(),
                current,
                pair.token_a.symbol,
                pair.token_b.symbol
            );
        }
        (&pair.token_a, &pair.token_b)
    }
}

/// `numerator / denominator`, zero for an empty denominator
fn ratio(numerator: Decimal, denominator: Decimal, hop: usize) -> Result<Decimal> {
    if denominator.is_zero() {
        return Ok(Decimal::ZERO);
    }
    numerator
        .checked_div(denominator)
        .ok_or(SwapError::Overflow { hop })
}
