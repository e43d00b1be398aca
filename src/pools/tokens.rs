//! Token listings for the swap selectors

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashSet;

use super::pair::{OwnedToken, PoolPair, PoolToken};
use crate::config::{Config, PRICE_DECIMALS};
use crate::graph::{NodeKey, PairGraph};
use crate::router::{reachable_nodes, round_price};

/// A token offered in a selector together with the amount shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapCandidate {
    /// Wallet-side id (the native token is mapped to its unified id)
    pub token_id: String,
    pub token: PoolToken,
    pub available: Decimal,
}

/// Every distinct token (by id) in the pair list, in first-seen order.
///
/// The reserve kept for a token is the one from the first pair listing it.
pub fn collect_tokens(pairs: &[PoolPair]) -> Vec<PoolToken> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tokens = Vec::new();

    for pair in pairs {
        for side in [&pair.token_a, &pair.token_b] {
            if seen.insert(side.id.as_str()) {
                tokens.push(side.clone());
            }
        }
    }

    tokens
}

/// Tokens that can be sold, largest wallet balance first
pub fn swap_from_candidates(
    tokens: &[PoolToken],
    owned: &[OwnedToken],
    config: &Config,
) -> Vec<SwapCandidate> {
    let mut candidates: Vec<SwapCandidate> = tokens
        .iter()
        .map(|token| {
            let token_id = if token.id == config.native_pair_token_id {
                config.native_token_id.clone()
            } else {
                token.id.clone()
            };
            let available = owned
                .iter()
                .find(|o| o.id == token_id)
                .map(|o| o.amount)
                .unwrap_or(Decimal::ZERO);

            SwapCandidate {
                token_id,
                token: token.clone(),
                available,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.available.cmp(&a.available));
    candidates
}

/// Swap-from candidates with `available` lowered to what can actually be sold
/// (see [`max_swappable_amount`]), re-sorted largest first.
pub fn spendable_candidates(
    tokens: &[PoolToken],
    owned: &[OwnedToken],
    config: &Config,
) -> Vec<SwapCandidate> {
    let mut candidates = swap_from_candidates(tokens, owned, config);
    for candidate in candidates.iter_mut() {
        if let Some(token) = owned.iter().find(|o| o.id == candidate.token_id) {
            candidate.available = max_swappable_amount(token, config);
        }
    }

    candidates.sort_by(|a, b| b.available.cmp(&a.available));
    candidates
}

/// Tokens reachable from `from` through any number of pairs, excluding `from`.
///
/// `from` and the graph nodes use the graph's key (symbol or id). On an id-keyed
/// graph the unified native id is looked up under its pair id. The amount shown
/// is the token's pool reserve.
pub fn swap_to_candidates(
    graph: &PairGraph,
    tokens: &[PoolToken],
    from: &str,
    config: &Config,
) -> Vec<SwapCandidate> {
    let key = graph.key();
    let from = if key == NodeKey::Id && from == config.native_token_id {
        config.native_pair_token_id.as_str()
    } else {
        from
    };

    reachable_nodes(graph, from)
        .into_iter()
        .filter_map(|node| tokens.iter().find(|token| key.of(token) == node))
        .map(|token| SwapCandidate {
            token_id: token.id.clone(),
            token: token.clone(),
            available: round_price(token.reserve),
        })
        .collect()
}

/// Largest amount of an owned token that can be put into a swap.
///
/// The native token keeps `reserved_native_amount` back for fees. Never
/// negative; truncated to `PRICE_DECIMALS` so it never exceeds the balance.
pub fn max_swappable_amount(owned: &OwnedToken, config: &Config) -> Decimal {
    let amount = if owned.id == config.native_token_id {
        owned.amount - config.reserved_native_amount
    } else {
        owned.amount
    };

    amount
        .max(Decimal::ZERO)
        .round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::ToZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn token(id: &str, symbol: &str, reserve: Decimal) -> PoolToken {
        PoolToken::new(id, symbol, symbol, reserve)
    }

    fn owned(id: &str, amount: Decimal) -> OwnedToken {
        OwnedToken {
            id: id.to_string(),
            symbol: id.to_string(),
            display_symbol: id.to_string(),
            amount,
        }
    }

    fn sample_pairs() -> Vec<PoolPair> {
        vec![
            PoolPair::new("5", token("2", "BTC", dec!(100)), token("0", "DFI", dec!(5000))),
            PoolPair::new("4", token("1", "ETH", dec!(300)), token("0", "DFI", dec!(900))),
            PoolPair::new("17", token("15", "DUSD", dec!(800)), token("0", "DFI", dec!(200))),
            PoolPair::new("20", token("16", "TSLA", dec!(10)), token("15", "DUSD", dec!(700))),
            PoolPair::new("30", token("40", "DOGE", dec!(1)), token("41", "SHIB", dec!(2))),
        ]
    }

    #[test]
    fn test_collect_tokens_unique_first_seen() {
        let tokens = collect_tokens(&sample_pairs());
        let ids: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "0", "1", "15", "16", "40", "41"]);

        // DFI keeps the reserve of the first pair it appeared in
        assert_eq!(tokens[1].reserve, dec!(5000));
    }

    #[test]
    fn test_swap_to_candidates_by_id() {
        let pairs = sample_pairs();
        let tokens = collect_tokens(&pairs);
        let graph = PairGraph::from_pairs(&pairs, NodeKey::Id);

        let candidates = swap_to_candidates(&graph, &tokens, "2", &Config::default());
        let symbols: Vec<&str> = candidates.iter().map(|c| c.token.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["DFI", "ETH", "DUSD", "TSLA"]);
        assert_eq!(candidates[0].available, dec!(5000));
    }

    #[test]
    fn test_swap_to_candidates_by_symbol() {
        let pairs = sample_pairs();
        let tokens = collect_tokens(&pairs);
        let graph = PairGraph::from_pairs(&pairs, NodeKey::Symbol);

        let candidates = swap_to_candidates(&graph, &tokens, "DOGE", &Config::default());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].token_id, "41");
    }

    #[test]
    fn test_swap_to_candidates_from_native_wallet_id() {
        let config = Config::default();
        let pairs = sample_pairs();
        let tokens = collect_tokens(&pairs);
        let graph = PairGraph::from_pairs(&pairs, NodeKey::Id);

        let wallet = vec![owned("0_unified", dec!(12))];
        let sources = swap_from_candidates(&tokens, &wallet, &config);
        assert_eq!(sources[0].token_id, "0_unified");

        let candidates = swap_to_candidates(&graph, &tokens, &sources[0].token_id, &config);
        let symbols: Vec<&str> = candidates.iter().map(|c| c.token.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "DUSD", "TSLA"]);
    }

    #[test]
    fn test_swap_to_candidates_round_reserve() {
        let pairs = vec![PoolPair::new(
            "7",
            token("3", "USDT", dec!(12.3456789012)),
            token("0", "DFI", dec!(1)),
        )];
        let tokens = collect_tokens(&pairs);
        let graph = PairGraph::from_pairs(&pairs, NodeKey::Id);

        let candidates = swap_to_candidates(&graph, &tokens, "0", &Config::default());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].available, dec!(12.34567890));
    }

    #[test]
    fn test_swap_from_candidates_sorted_by_balance() {
        let config = Config::default();
        let tokens = collect_tokens(&sample_pairs());
        let wallet = vec![owned("0_unified", dec!(12)), owned("1", dec!(30))];

        let candidates = swap_from_candidates(&tokens, &wallet, &config);
        assert_eq!(candidates.len(), tokens.len());
        assert_eq!(candidates[0].token_id, "1");
        assert_eq!(candidates[0].available, dec!(30));
        assert_eq!(candidates[1].token_id, "0_unified");
        assert_eq!(candidates[1].token.symbol, "DFI");
        assert_eq!(candidates[1].available, dec!(12));
        assert!(candidates[2..].iter().all(|c| c.available.is_zero()));
    }

    #[test]
    fn test_spendable_candidates_sorted_after_fee_reserve() {
        let config = Config::default();
        let tokens = collect_tokens(&sample_pairs());
        let wallet = vec![owned("0_unified", dec!(12)), owned("2", dec!(11.95))];

        // by raw balance DFI leads, but only 11.9 of it can be sold
        let raw = swap_from_candidates(&tokens, &wallet, &config);
        assert_eq!(raw[0].token_id, "0_unified");

        let candidates = spendable_candidates(&tokens, &wallet, &config);
        assert_eq!(candidates[0].token_id, "2");
        assert_eq!(candidates[0].available, dec!(11.95));
        assert_eq!(candidates[1].token_id, "0_unified");
        assert_eq!(candidates[1].available, dec!(11.9));
        assert!(candidates
            .windows(2)
            .all(|w| w[0].available >= w[1].available));
    }

    #[test]
    fn test_max_swappable_amount() {
        let config = Config::default();

        assert_eq!(max_swappable_amount(&owned("2", dec!(1.5)), &config), dec!(1.5));
        assert_eq!(max_swappable_amount(&owned("0_unified", dec!(1.5)), &config), dec!(1.4));
        assert_eq!(max_swappable_amount(&owned("0_unified", dec!(0.05)), &config), Decimal::ZERO);
        assert_eq!(max_swappable_amount(&owned("0_unified", dec!(0.1)), &config), Decimal::ZERO);
        assert_eq!(
            max_swappable_amount(&owned("2", dec!(0.123456789)), &config),
            dec!(0.12345678)
        );
    }
}
