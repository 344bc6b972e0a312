//! Definition of the `Edge` type.
use serde::{Deserialize, Serialize};

/// One direction of a road between two nodes.
///
/// Roads are undirected, so every road is stored as two `Edge`s, one
/// on each endpoint. The far endpoint is referenced by label rather
/// than by pointer; the owning [`NetworkGraph`](crate::network::NetworkGraph)
/// resolves labels to nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The label of the neighboring node.
    pub to: String,

    /// The weight of the edge, in kilometres. Always positive.
    pub distance: u32,
}

impl Edge {
    /// Creates an edge pointing at `to`.
    pub fn new(to: &str, distance: u32) -> Edge {
        Edge {
            to: to.to_string(),
            distance,
        }
    }

    /// The `(label, weight)` pair handed out by neighbor queries.
    pub fn as_pair(&self) -> (String, u32) {
        (self.to.clone(), self.distance)
    }
}
