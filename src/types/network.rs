//! The road network.
//!
//! [`NetworkGraph`] is an undirected weighted graph over named
//! locations. Nodes are kept in a label-keyed arena and roads are
//! stored on both endpoints as label/weight pairs, so there is no
//! cyclic ownership between nodes.
//!
//! Only reachability is answered here. Path weights are carried along
//! for display but never minimized.

use std::collections::HashMap;

use crate::types::node::Node;

/// A neighbor list as handed out to callers: `(label, distance)` pairs.
pub type Neighbors = Vec<(String, u32)>;

/// An undirected graph of locations connected by roads.
#[derive(Debug, Default, Clone)]
pub struct NetworkGraph {
    nodes: HashMap<String, Node>,
}

impl NetworkGraph {
    /// Creates an empty network.
    pub fn new() -> NetworkGraph {
        NetworkGraph {
            nodes: HashMap::new(),
        }
    }

    /// Adds a location.
    ///
    /// Returns `false` without touching the graph if the label is
    /// already present.
    pub fn add_node(&mut self, label: &str) -> bool {
        if self.nodes.contains_key(label) {
            debug!("node {} already present", label);
            return false;
        }
        self.nodes.insert(label.to_string(), Node::new(label));
        info!("added node {}", label);
        true
    }

    /// Adds a road of `distance` between two existing locations.
    ///
    /// Both directions are recorded with the same weight. Re-adding an
    /// existing road is a no-op; the first weight wins.
    ///
    /// The caller is expected to have checked `distance > 0` and
    /// `label1 != label2`.
    ///
    /// # Returns
    /// `false` if either label is unknown, `true` otherwise.
    pub fn add_edge(&mut self, label1: &str, label2: &str, distance: u32) -> bool {
        if !self.nodes.contains_key(label1) || !self.nodes.contains_key(label2) {
            warn!("cannot connect {} and {}: unknown node", label1, label2);
            return false;
        }

        let forward = self
            .nodes
            .get_mut(label1)
            .map(|node| node.connect(label2, distance))
            .unwrap_or(false);
        let backward = self
            .nodes
            .get_mut(label2)
            .map(|node| node.connect(label1, distance))
            .unwrap_or(false);

        if forward || backward {
            info!("added road {} <-> {} ({}km)", label1, label2, distance);
        } else {
            debug!("road {} <-> {} already present", label1, label2);
        }
        true
    }

    /// Returns `true` if `label` names a node of the network.
    pub fn contains_node(&self, label: &str) -> bool {
        self.nodes.contains_key(label)
    }

    /// Roads leaving `label`, in the order they were added.
    ///
    /// Unknown labels yield an empty list.
    pub fn neighbors(&self, label: &str) -> Neighbors {
        self.nodes
            .get(label)
            .map(|node| node.edges.iter().map(|edge| edge.as_pair()).collect())
            .unwrap_or_default()
    }

    /// Checks whether any path joins `source` and `destination`.
    ///
    /// Identical labels are reachable from each other even when the
    /// label is not part of the network. Otherwise both labels must
    /// exist. The search is an iterative depth-first traversal that
    /// marks nodes as they are pushed, so every node is visited at
    /// most once and cycles terminate.
    ///
    /// Visited flags are cleared at the start of every call.
    pub fn is_reachable(&mut self, source: &str, destination: &str) -> bool {
        if source == destination {
            return true;
        }
        if !self.nodes.contains_key(source) || !self.nodes.contains_key(destination) {
            debug!(
                "reachability {} -> {}: unknown endpoint",
                source, destination
            );
            return false;
        }

        self.reset_visited();
        let mut stack = vec![source.to_string()];
        if let Some(start) = self.nodes.get_mut(source) {
            start.visited = true;
        }

        while let Some(current) = stack.pop() {
            if current == destination {
                debug!("reachability {} -> {}: found", source, destination);
                return true;
            }

            let next: Vec<String> = match self.nodes.get(&current) {
                Some(node) => node.edges.iter().map(|edge| edge.to.clone()).collect(),
                None => continue,
            };
            for label in next {
                if let Some(neighbor) = self.nodes.get_mut(&label) {
                    if !neighbor.visited {
                        neighbor.visited = true;
                        stack.push(label);
                    }
                }
            }
        }

        debug!("reachability {} -> {}: no path", source, destination);
        false
    }

    /// Every node with its neighbor list, labels sorted
    /// lexicographically.
    pub fn display(&self) -> Vec<(String, Neighbors)> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.label.cmp(&b.label));
        nodes
            .into_iter()
            .map(|node| {
                let neighbors = node.edges.iter().map(|edge| edge.as_pair()).collect();
                (node.label.clone(), neighbors)
            })
            .collect()
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of roads in the graph.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum::<usize>() / 2
    }

    /// Returns `true` if no node has been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn reset_visited(&mut self) {
        for node in self.nodes.values_mut() {
            node.visited = false;
        }
    }
}
