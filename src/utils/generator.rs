//! Random road networks and fleets, for tests and demos.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::config::MAX_BATTERY_LEVEL;
use crate::error::Result;
use crate::network::NetworkGraph;
use crate::vehicle::VehicleRecord;

/// Longest road or trip the generator produces, in kilometres.
pub const MAX_GENERATED_DISTANCE_KM: u32 = 500;

/// Builds a connected network of `capacity` nodes named `loc_0`,
/// `loc_1`, ...
///
/// Consecutive nodes are chained together so every node is reachable
/// from every other; each remaining pair is then joined with
/// probability `edge_probability`.
pub fn generate_network(capacity: usize, edge_probability: f64) -> NetworkGraph {
    let mut rng = rand::thread_rng();
    let mut network = NetworkGraph::new();
    let labels: Vec<String> = (0..capacity).map(|i| format!("loc_{}", i)).collect();

    for label in &labels {
        network.add_node(label);
    }
    for pair in labels.windows(2) {
        network.add_edge(&pair[0], &pair[1], random_distance(&mut rng));
    }

    let edge_probability = edge_probability.clamp(0.0, 1.0);
    for (i, from) in labels.iter().enumerate() {
        for to in labels.iter().skip(i + 2) {
            if rng.gen_bool(edge_probability) {
                network.add_edge(from, to, random_distance(&mut rng));
            }
        }
    }
    network
}

/// Generates `count` vehicles with random ids, positions among
/// `labels`, distances and battery levels.
///
/// Returns no vehicles if `labels` is empty.
pub fn generate_vehicles(labels: &[&str], count: usize) -> Result<Vec<VehicleRecord>> {
    let mut rng = rand::thread_rng();
    let mut vehicles = Vec::with_capacity(count);
    if labels.is_empty() {
        return Ok(vehicles);
    }

    for _ in 0..count {
        let location = labels.choose(&mut rng).copied();
        let destination = labels.choose(&mut rng).copied();
        let battery_level = rng.gen_range(0..=MAX_BATTERY_LEVEL);
        let mut vehicle = VehicleRecord::new(
            &Uuid::new_v4().to_string(),
            location,
            destination,
            battery_level,
        )?;
        vehicle.set_distance_to_destination(random_distance(&mut rng) as i64)?;
        vehicles.push(vehicle);
    }
    Ok(vehicles)
}

fn random_distance(rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=MAX_GENERATED_DISTANCE_KM)
}
