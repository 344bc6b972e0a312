//! Fleet Coordination Engine.
//! Keeps a road network and a vehicle registry in memory and ranks
//! vehicles for dispatch.
//!
//! The pieces, leaf first:
//!
//! * [`PriorityHeap`](heap::PriorityHeap): bounded binary min-heap.
//! * [`KeyedStore`](store::KeyedStore): open-addressing hash table with
//!   tombstones and doubling resize.
//! * [`NetworkGraph`](network::NetworkGraph): undirected weighted graph
//!   with reachability queries.
//! * [`ranking`]: nearest-to-destination and highest-battery
//!   recommendations.
//! * [`FleetState`](fleet_state::FleetState): the context object that
//!   owns one network and one vehicle table and validates requests.

#[macro_use]
extern crate log;

pub mod config;
pub mod error;

/// Plain data types and the containers holding them.
pub mod types {
    pub mod edge;
    pub mod network;
    pub mod node;
    pub mod store;
    pub mod vehicle;
}

/// Heap and sorting routines.
pub mod algorithms {
    pub mod heap;
    pub mod ranking;
}

/// Application-level helpers built on the engine.
pub mod utils {
    pub mod fleet_state;
    pub mod generator;
}

pub use algorithms::*;
pub use types::*;
pub use utils::*;

pub use error::{FleetError, Result};
