//! Struct definitions and implementations for objects that represent
//! vertices in the road network.
//!
//! A [`Node`] is a named location. It owns the list of roads leaving
//! it as [`Edge`]s keyed by the neighbor's label, which keeps the
//! graph free of node-to-node references: every node lives in a single
//! arena inside [`NetworkGraph`](crate::network::NetworkGraph) and
//! neighbors are looked up by label.

use super::edge::Edge;

/// Represent a vertex in a graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique name of the location, e.g. `"Depot"`.
    pub label: String,

    /// Roads leaving this node, in the order they were added.
    pub edges: Vec<Edge>,

    /// Scratch flag used by traversals. Only meaningful during a
    /// reachability query; the graph resets it before every query.
    pub visited: bool,
}

impl Node {
    /// Creates an unconnected node.
    pub fn new(label: &str) -> Node {
        Node {
            label: label.to_string(),
            edges: Vec::new(),
            visited: false,
        }
    }

    /// Returns `true` if a road to `label` is already recorded.
    pub fn has_neighbor(&self, label: &str) -> bool {
        self.edges.iter().any(|edge| edge.to == label)
    }

    /// Records a road to `label`.
    ///
    /// An existing road is left untouched, including its weight.
    /// Returns `true` if a new edge was appended.
    pub fn connect(&mut self, label: &str, distance: u32) -> bool {
        if self.has_neighbor(label) {
            return false;
        }
        self.edges.push(Edge::new(label, distance));
        true
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod node_type_tests {
    use super::*;

    #[test]
    fn test_connect_keeps_first_weight() {
        let mut depot = Node::new("Depot");
        assert!(depot.connect("Harbor", 12));
        assert!(!depot.connect("Harbor", 99));

        assert_eq!(depot.edges, vec![Edge::new("Harbor", 12)]);
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let mut depot = Node::new("Depot");
        depot.connect("Zoo", 1);
        depot.connect("Airport", 2);
        depot.connect("Market", 3);

        let labels: Vec<&str> = depot.edges.iter().map(|e| e.to.as_str()).collect();
        assert_eq!(labels, vec!["Zoo", "Airport", "Market"]);
        assert!(depot.has_neighbor("Airport"));
        assert!(!depot.has_neighbor("Depot"));
    }
}
