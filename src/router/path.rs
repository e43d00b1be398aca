use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use super::pricing::{compute_rate, PriceRates};
use crate::error::Result;
use crate::graph::{is_pair, NodeKey, PairGraph};
use crate::pools::PoolPair;

/// A priced route between two tokens
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub source: String,
    pub destination: String,
    pub path: Vec<String>,
    pub pair_ids: Vec<String>,
    pub input_amount: Decimal,
    pub rates: PriceRates,
}

impl SwapQuote {
    /// Get the number of hops (pool pairs) in the route
    pub fn hop_count(&self) -> usize {
        self.pair_ids.len()
    }

    /// Whether a swap can be submitted: a full route and a non-zero estimate
    pub fn can_submit(&self) -> bool {
        self.path.len() >= 2
            && self.hop_count() == self.path.len() - 1
            && self.rates.estimated_output > Decimal::ZERO
    }

    /// Get a formatted string of the token path
    pub fn token_path(&self) -> String {
        self.path.join(" -> ")
    }
}

/// Route discovery and pricing over one pair graph
pub struct SwapRouter<'a> {
    graph: &'a PairGraph,
}

impl<'a> SwapRouter<'a> {
    pub fn new(graph: &'a PairGraph) -> Self {
        Self { graph }
    }

    pub fn find_path(&self, source: &str, destination: &str) -> Vec<String> {
        find_path(self.graph, source, destination)
    }

    pub fn reachable_nodes(&self, source: &str) -> Vec<String> {
        reachable_nodes(self.graph, source)
    }

    /// Resolve a path against the snapshot the graph was built from
    pub fn resolve_route(&self, path: &[String]) -> Vec<PoolPair> {
        resolve_route_to_pairs(path, self.graph.pairs(), self.graph.key())
    }

    /// Find, resolve and price a route in one pass over the same snapshot
    pub fn quote(&self, source: &str, destination: &str, amount: Decimal) -> Result<SwapQuote> {
        let path = self.find_path(source, destination);
        let pairs = self.resolve_route(&path);
        let rates = compute_rate(&self.source_symbol(source, &pairs), &pairs, amount)?;

        if path.is_empty() {
            tracing::info!("No route from {} to {}", source, destination);
        } else {
            tracing::debug!(
                "Route {} | {} hops | forward {} | estimated {}",
                path.join(" -> "),
                pairs.len(),
                rates.forward_rate,
                rates.estimated_output
            );
        }

        Ok(SwapQuote {
            source: source.to_string(),
            destination: destination.to_string(),
            path,
            pair_ids: pairs.iter().map(|pair| pair.id.clone()).collect(),
            input_amount: amount,
            rates,
        })
    }

    /// Pricing orients pairs by symbol; translate an id-keyed source
    fn source_symbol(&self, source: &str, pairs: &[PoolPair]) -> String {
        match self.graph.key() {
            NodeKey::Symbol => source.to_string(),
            NodeKey::Id => pairs
                .first()
                .and_then(|pair| {
                    [&pair.token_a, &pair.token_b]
                        .into_iter()
                        .find(|token| token.id == source)
                })
                .map(|token| token.symbol.clone())
                .unwrap_or_else(|| source.to_string()),
        }
    }
}

/// Breadth-first route search.
///
/// Uses a FIFO queue, so the first route found has the fewest hops; ties are
/// broken by discovery order (snapshot order of the pairs). Routes are not
/// compared by price, so a cheaper route with more hops is never chosen.
///
/// Returns `[source]` when source and destination are the same known token,
/// and an empty path when no route exists.
pub fn find_path(graph: &PairGraph, source: &str, destination: &str) -> Vec<String> {
    if !graph.contains(source) || !graph.contains(destination) {
        tracing::debug!("No route {} -> {}: token not in graph", source, destination);
        return Vec::new();
    }
    if source == destination {
        return vec![source.to_string()];
    }

    let mut predecessor: HashMap<String, String> = HashMap::new();
    let mut discovered: HashSet<String> = HashSet::from([source.to_string()]);
    let mut queue: VecDeque<String> = VecDeque::from([source.to_string()]);

    while let Some(node) = queue.pop_front() {
        for neighbour in graph.adjacent_nodes(&node) {
            if !discovered.insert(neighbour.clone()) {
                continue;
            }
            predecessor.insert(neighbour.clone(), node.clone());

            if neighbour == destination {
                return rebuild_path(&predecessor, source, destination);
            }
            queue.push_back(neighbour);
        }
    }

    Vec::new()
}

/// Walk the predecessor links back from the destination
fn rebuild_path(predecessor: &HashMap<String, String>, source: &str, destination: &str) -> Vec<String> {
    let mut path = vec![destination.to_string()];
    let mut current = destination;

    while current != source {
        match predecessor.get(current) {
            Some(previous) => {
                path.push(previous.clone());
                current = previous.as_str();
            }
            None => return Vec::new(),
        }
    }

    path.reverse();
    path
}

/// Every token reachable from `source`, in first-discovered order, excluding `source`
pub fn reachable_nodes(graph: &PairGraph, source: &str) -> Vec<String> {
    let mut reachable: Vec<String> = Vec::new();
    let mut discovered: HashSet<String> = HashSet::from([source.to_string()]);
    let mut queue: VecDeque<String> = VecDeque::from([source.to_string()]);

    while let Some(node) = queue.pop_front() {
        for neighbour in graph.adjacent_nodes(&node) {
            if discovered.insert(neighbour.clone()) {
                reachable.push(neighbour.clone());
                queue.push_back(neighbour);
            }
        }
    }

    reachable
}

/// Map each consecutive pair of route nodes to the first pool pair joining them.
///
/// Segments with no matching pair (the list changed since the route was found)
/// are dropped, so the result can be shorter than `path.len() - 1`.
pub fn resolve_route_to_pairs(path: &[String], pairs: &[PoolPair], key: NodeKey) -> Vec<PoolPair> {
    path.windows(2)
        .filter_map(|segment| {
            let found = pairs
                .iter()
                .find(|pair| is_pair(pair, key, &segment[0], &segment[1]));
            if found.is_none() {
                tracing::debug!(
                    "Dropping stale route segment {} -> {}: no matching pair",
                    segment[0],
                    segment[1]
                );
            }
            found.cloned()
        })
        .collect()
}
