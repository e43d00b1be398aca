pub mod pair;
pub mod tokens;

pub use pair::{is_valid_identifier, OwnedToken, PairSnapshot, PoolPair, PoolToken};
pub use tokens::{
    collect_tokens, max_swappable_amount, spendable_candidates, swap_from_candidates,
    swap_to_candidates, SwapCandidate,
};
