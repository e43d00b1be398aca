use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};

/// One side of a pool pair: a token and the reserve it holds in that pair.
///
/// The same token can carry different reserves in different pairs, so a
/// `PoolToken` is only meaningful together with the pair it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolToken {
    pub id: String,
    pub symbol: String,
    #[serde(alias = "display_symbol")]
    pub display_symbol: String,
    pub reserve: Decimal,
}

impl PoolToken {
    pub fn new(id: &str, symbol: &str, display_symbol: &str, reserve: Decimal) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
            display_symbol: display_symbol.to_string(),
            reserve,
        }
    }
}

/// A two-sided liquidity pool: one undirected edge of the trading graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPair {
    pub id: String,
    #[serde(alias = "token_a")]
    pub token_a: PoolToken,
    #[serde(alias = "token_b")]
    pub token_b: PoolToken,
}

impl PoolPair {
    pub fn new(id: &str, token_a: PoolToken, token_b: PoolToken) -> Self {
        Self {
            id: id.to_string(),
            token_a,
            token_b,
        }
    }

    /// Check the pair invariants: distinct symbols, well-formed ids, non-negative reserves
    pub fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.id) {
            return Err(SwapError::InvalidTokenId(self.id.clone()));
        }

        for side in [&self.token_a, &self.token_b] {
            if !is_valid_identifier(&side.id) {
                return Err(SwapError::InvalidTokenId(side.id.clone()));
            }
            if !is_valid_identifier(&side.symbol) {
                return Err(SwapError::InvalidTokenId(side.symbol.clone()));
            }
            if side.reserve.is_sign_negative() && !side.reserve.is_zero() {
                return Err(SwapError::NegativeReserve {
                    pair_id: self.id.clone(),
                    symbol: side.symbol.clone(),
                    reserve: side.reserve,
                });
            }
        }

        if self.token_a.symbol == self.token_b.symbol {
            return Err(SwapError::SelfPair {
                pair_id: self.id.clone(),
                symbol: self.token_a.symbol.clone(),
            });
        }

        Ok(())
    }

    /// `Symbol/Symbol` label used in logs and the CLI
    pub fn label(&self) -> String {
        format!("{}-{}", self.token_a.display_symbol, self.token_b.display_symbol)
    }
}

/// A wallet balance for a token the user can swap from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedToken {
    pub id: String,
    pub symbol: String,
    #[serde(alias = "display_symbol")]
    pub display_symbol: String,
    pub amount: Decimal,
}

/// The pool-pair list exactly as delivered by one API poll
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSnapshot {
    #[serde(default = "Utc::now", alias = "captured_at")]
    pub captured_at: DateTime<Utc>,
    pub pairs: Vec<PoolPair>,
}

impl PairSnapshot {
    pub fn new(pairs: Vec<PoolPair>) -> Self {
        Self {
            captured_at: Utc::now(),
            pairs,
        }
    }

    /// Parse and validate a snapshot.
    ///
    /// Accepts either `{"capturedAt": ..., "pairs": [...]}` or a bare array of pairs.
    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot = match serde_json::from_str::<PairSnapshot>(raw) {
            Ok(snapshot) => snapshot,
            Err(_) => {
                let pairs: Vec<PoolPair> =
                    serde_json::from_str(raw).map_err(|e| SwapError::Snapshot(e.to_string()))?;
                Self::new(pairs)
            }
        };

        snapshot.validate()?;

        tracing::debug!(
            "Loaded snapshot captured at {} with {} pool pairs",
            snapshot.captured_at,
            snapshot.pairs.len()
        );

        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<()> {
        self.pairs.iter().try_for_each(PoolPair::validate)
    }
}

/// Format check for token ids, symbols and pair ids (not an existence check)
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pair(a: &str, b: &str) -> PoolPair {
        PoolPair::new(
            &format!("{}-{}", a, b),
            PoolToken::new(a, a, a, dec!(1000)),
            PoolToken::new(b, b, b, dec!(10000)),
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(pair("BTC", "DFI").validate().is_ok());
    }

    #[test]
    fn test_validate_self_pair() {
        let err = pair("DFI", "DFI").validate().unwrap_err();
        assert!(matches!(err, SwapError::SelfPair { .. }));
    }

    #[test]
    fn test_validate_negative_reserve() {
        let mut p = pair("BTC", "DFI");
        p.token_b.reserve = dec!(-1);
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SwapError::NegativeReserve { .. }));
    }

    #[test]
    fn test_validate_bad_identifier() {
        let mut p = pair("BTC", "DFI");
        p.token_a.symbol = "B TC".to_string();
        assert_eq!(
            p.validate().unwrap_err(),
            SwapError::InvalidTokenId("B TC".to_string())
        );
    }

    #[test]
    fn test_snapshot_from_object() {
        let raw = r#"{
            "capturedAt": "2024-01-02T03:04:05Z",
            "pairs": [{
                "id": "5",
                "tokenA": { "id": "2", "symbol": "BTC", "displaySymbol": "dBTC", "reserve": "1000.5" },
                "tokenB": { "id": "0", "symbol": "DFI", "displaySymbol": "DFI", "reserve": 10000 }
            }]
        }"#;

        let snapshot = PairSnapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.pairs.len(), 1);
        assert_eq!(snapshot.pairs[0].token_a.reserve, dec!(1000.5));
        assert_eq!(snapshot.pairs[0].token_b.reserve, dec!(10000));
        assert_eq!(snapshot.captured_at.to_rfc3339(), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_snapshot_from_bare_array() {
        let raw = r#"[{
            "id": "5",
            "tokenA": { "id": "2", "symbol": "BTC", "displaySymbol": "dBTC", "reserve": "1" },
            "tokenB": { "id": "0", "symbol": "DFI", "displaySymbol": "DFI", "reserve": "2" }
        }]"#;

        let snapshot = PairSnapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.pairs[0].label(), "dBTC-DFI");
    }

    #[test]
    fn test_snapshot_rejects_invalid_pair() {
        let raw = r#"[{
            "id": "5",
            "tokenA": { "id": "2", "symbol": "BTC", "displaySymbol": "dBTC", "reserve": "1" },
            "tokenB": { "id": "3", "symbol": "BTC", "displaySymbol": "dBTC", "reserve": "2" }
        }]"#;

        assert!(matches!(
            PairSnapshot::from_json(raw),
            Err(SwapError::SelfPair { .. })
        ));
    }

    #[test]
    fn test_snapshot_malformed_json() {
        assert!(matches!(
            PairSnapshot::from_json("not json"),
            Err(SwapError::Snapshot(_))
        ));
    }
}
