pub mod path;
pub mod pricing;

pub use path::{find_path, reachable_nodes, resolve_route_to_pairs, SwapQuote, SwapRouter};
pub use pricing::{compute_rate, parse_input_amount, round_price, slippage_factor, PriceRates};
