use serde::{Deserialize, Serialize};

use crate::pools::{PoolPair, PoolToken};

/// Which token field identifies a graph node.
///
/// Swap routing walks symbols, while "which tokens can I swap to" walks
/// token ids, so the same pair list is keyed either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKey {
    #[default]
    Symbol,
    Id,
}

impl NodeKey {
    /// Node identifier of one pair side
    pub fn of<'a>(&self, token: &'a PoolToken) -> &'a str {
        match self {
            NodeKey::Symbol => &token.symbol,
            NodeKey::Id => &token.id,
        }
    }

    /// Both node identifiers of a pair, `token_a` first
    pub fn ends<'a>(&self, pair: &'a PoolPair) -> (&'a str, &'a str) {
        (self.of(&pair.token_a), self.of(&pair.token_b))
    }
}

/// True iff `pair` connects `node_a` and `node_b`, in either order
pub fn is_pair(pair: &PoolPair, key: NodeKey, node_a: &str, node_b: &str) -> bool {
    let (a, b) = key.ends(pair);
    (a == node_a && b == node_b) || (a == node_b && b == node_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc_dfi() -> PoolPair {
        PoolPair::new(
            "5",
            PoolToken::new("2", "BTC", "dBTC", dec!(1000)),
            PoolToken::new("0", "DFI", "DFI", dec!(10000)),
        )
    }

    #[test]
    fn test_is_pair_either_order() {
        let pair = btc_dfi();
        assert!(is_pair(&pair, NodeKey::Symbol, "BTC", "DFI"));
        assert!(is_pair(&pair, NodeKey::Symbol, "DFI", "BTC"));
        assert!(!is_pair(&pair, NodeKey::Symbol, "BTC", "ETH"));
        assert!(!is_pair(&pair, NodeKey::Symbol, "BTC", "BTC"));
    }

    #[test]
    fn test_is_pair_by_id() {
        let pair = btc_dfi();
        assert!(is_pair(&pair, NodeKey::Id, "0", "2"));
        assert!(!is_pair(&pair, NodeKey::Id, "BTC", "DFI"));
    }
}
