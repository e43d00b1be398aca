pub mod builder;
pub mod types;

// Re-exports for external use
pub use builder::PairGraph;
pub use types::{is_pair, NodeKey};
