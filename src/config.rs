//! Composite swap configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Fractional digits of every displayed price and amount (smallest on-chain unit)
pub const PRICE_DECIMALS: u32 = 8;

// Defaults
pub const DEFAULT_POOL_PAIRS_FILE: &str = "poolpairs.json";
pub const DEFAULT_SLIPPAGE_TOLERANCE: Decimal = dec!(0.03);
pub const DEFAULT_NATIVE_TOKEN_ID: &str = "0_unified";
pub const DEFAULT_NATIVE_PAIR_TOKEN_ID: &str = "0";
pub const DEFAULT_RESERVED_NATIVE_AMOUNT: Decimal = dec!(0.1);

/// Runtime configuration for the swap CLI
#[derive(Debug, Clone)]
pub struct Config {
    pub pool_pairs_file: PathBuf,
    pub slippage_tolerance: Decimal, // 0.03 = 3%
    pub native_token_id: String,     // Wallet id of the unified native token
    pub native_pair_token_id: String, // Id of the native token inside pool pairs
    pub reserved_native_amount: Decimal, // Kept back from the native balance for fees
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_pairs_file: PathBuf::from(DEFAULT_POOL_PAIRS_FILE),
            slippage_tolerance: DEFAULT_SLIPPAGE_TOLERANCE,
            native_token_id: DEFAULT_NATIVE_TOKEN_ID.to_string(),
            native_pair_token_id: DEFAULT_NATIVE_PAIR_TOKEN_ID.to_string(),
            reserved_native_amount: DEFAULT_RESERVED_NATIVE_AMOUNT,
        }
    }
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let slippage_tolerance = decimal_var("SLIPPAGE_TOLERANCE")?
            .unwrap_or(defaults.slippage_tolerance);
        if slippage_tolerance < Decimal::ZERO || slippage_tolerance > Decimal::ONE {
            return Err(eyre::eyre!(
                "SLIPPAGE_TOLERANCE must be between 0 and 1, got {}",
                slippage_tolerance
            ));
        }

        let reserved_native_amount = decimal_var("RESERVED_NATIVE_AMOUNT")?
            .unwrap_or(defaults.reserved_native_amount);
        if reserved_native_amount.is_sign_negative() {
            return Err(eyre::eyre!(
                "RESERVED_NATIVE_AMOUNT must not be negative, got {}",
                reserved_native_amount
            ));
        }

        Ok(Self {
            pool_pairs_file: env::var("POOL_PAIRS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.pool_pairs_file),
            slippage_tolerance,
            native_token_id: env::var("NATIVE_TOKEN_ID").unwrap_or(defaults.native_token_id),
            native_pair_token_id: env::var("NATIVE_PAIR_TOKEN_ID")
                .unwrap_or(defaults.native_pair_token_id),
            reserved_native_amount,
        })
    }
}

/// Read an optional decimal environment variable
fn decimal_var(name: &str) -> eyre::Result<Option<Decimal>> {
    match env::var(name) {
        Ok(raw) => Decimal::from_str(raw.trim())
            .map(Some)
            .map_err(|e| eyre::eyre!("Invalid {}='{}': {}", name, raw, e)),
        Err(_) => Ok(None),
    }
}
