//! Pool-pair route discovery and multi-hop swap pricing.
//!
//! Build a [`PairGraph`] from one [`PairSnapshot`], find a route with
//! [`find_path`], resolve it to pool pairs and price it with [`compute_rate`].
//! Everything is a pure function of its inputs; callers own all state.

pub mod config;
pub mod display;
pub mod error;
pub mod graph;
pub mod pools;
pub mod router;

pub use config::Config;
pub use error::SwapError;
pub use graph::{is_pair, NodeKey, PairGraph};
pub use pools::{OwnedToken, PairSnapshot, PoolPair, PoolToken};
pub use router::{
    compute_rate, find_path, reachable_nodes, resolve_route_to_pairs, PriceRates, SwapQuote,
    SwapRouter,
};
