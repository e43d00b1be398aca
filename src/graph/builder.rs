use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::NodeKey;
use crate::pools::PoolPair;

/// Undirected graph of tradable token pairs, built from one pool-pair snapshot.
///
/// Nodes are token symbols or token ids depending on `NodeKey`; every pool pair
/// is one edge whose weight is the pair's index in the snapshot. The graph is
/// never updated in place: a new snapshot means a new graph.
#[derive(Debug, Clone)]
pub struct PairGraph {
    pub graph: UnGraph<String, usize>,
    key: NodeKey,
    node_index: HashMap<String, NodeIndex>,
    pairs: Vec<PoolPair>,
}

impl PairGraph {
    /// Build the graph for a pool-pair list
    pub fn from_pairs(pairs: &[PoolPair], key: NodeKey) -> Self {
        let mut graph = Self {
            graph: UnGraph::default(),
            key,
            node_index: HashMap::new(),
            pairs: pairs.to_vec(),
        };

        for (position, pair) in pairs.iter().enumerate() {
            let (a, b) = key.ends(pair);

            // A pair must join two different tokens
            if a == b {
                tracing::trace!("Skipping pair {} - both sides are {}", pair.id, a);
                continue;
            }

            let node_a = graph.get_or_create_node(a);
            let node_b = graph.get_or_create_node(b);
            graph.graph.add_edge(node_a, node_b, position);
        }

        tracing::debug!(
            "Built {:?}-keyed pair graph with {} nodes, {} edges",
            key,
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    /// Get or create a node for a token identifier
    fn get_or_create_node(&mut self, token: &str) -> NodeIndex {
        if let Some(&node) = self.node_index.get(token) {
            node
        } else {
            let node = self.graph.add_node(token.to_string());
            self.node_index.insert(token.to_string(), node);
            node
        }
    }

    /// Tokens tradable with `node` through exactly one pool pair.
    ///
    /// Neighbours are de-duplicated and returned in snapshot order (the order
    /// of the first pair linking them), so traversal order is deterministic.
    /// Unknown nodes have no neighbours.
    pub fn adjacent_nodes(&self, node: &str) -> Vec<String> {
        let Some(&index) = self.node_index.get(node) else {
            return Vec::new();
        };

        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), other)
            })
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);

        let mut adjacent: Vec<String> = Vec::with_capacity(edges.len());
        for (_, other) in edges {
            let token = &self.graph[other];
            if !adjacent.contains(token) {
                adjacent.push(token.clone());
            }
        }

        adjacent
    }

    /// Whether the token appears in any pair of the snapshot
    pub fn contains(&self, node: &str) -> bool {
        self.node_index.contains_key(node)
    }

    /// The snapshot this graph was built from
    pub fn pairs(&self) -> &[PoolPair] {
        &self.pairs
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Get the number of nodes (tokens) in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges (pool pairs) in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
