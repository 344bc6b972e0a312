//! Stores the state of the fleet.
//!
//! [`FleetState`] owns the one road network and the one vehicle table
//! of an application. Front ends (a menu, a service handler) construct
//! it once and drive the engine through it; every request is checked
//! against the network before anything is written.

use crate::config::{StoreConfig, MAX_BATTERY_LEVEL};
use crate::error::{FleetError, Result};
use crate::network::{NetworkGraph, Neighbors};
use crate::ranking;
use crate::store::KeyedStore;
use crate::vehicle::VehicleRecord;

/// The road network and the vehicles travelling on it.
#[derive(Debug, Default)]
pub struct FleetState {
    network: NetworkGraph,
    vehicles: KeyedStore<VehicleRecord>,
}

impl FleetState {
    /// Creates an empty fleet with a default-sized vehicle table.
    pub fn new() -> FleetState {
        FleetState::default()
    }

    pub fn with_config(config: StoreConfig) -> FleetState {
        FleetState {
            network: NetworkGraph::new(),
            vehicles: KeyedStore::with_config(config),
        }
    }

    /// Read-only access to the road network.
    pub fn network(&self) -> &NetworkGraph {
        &self.network
    }

    /// Read-only access to the vehicle table.
    pub fn vehicle_table(&self) -> &KeyedStore<VehicleRecord> {
        &self.vehicles
    }

    //------------------------------------------------------------------
    // Road network
    //------------------------------------------------------------------

    /// Adds a location to the road network.
    pub fn add_location(&mut self, label: &str) -> Result<()> {
        let label = non_empty(label)?;
        if !self.network.add_node(label) {
            warn!("location {} already exists", label);
            return Err(FleetError::DuplicateLocation(label.to_string()));
        }
        Ok(())
    }

    /// Adds a road of `distance` kilometres between two known locations.
    pub fn add_road(&mut self, from: &str, to: &str, distance: i64) -> Result<()> {
        self.known_location(from)?;
        self.known_location(to)?;
        if from == to {
            warn!("refusing road from {} to itself", from);
            return Err(FleetError::SameLocation(from.to_string()));
        }
        let distance = positive_distance(distance)?;
        self.network.add_edge(from, to, distance);
        Ok(())
    }

    /// Checks whether a path exists between two known locations.
    pub fn check_path(&mut self, from: &str, to: &str) -> Result<bool> {
        self.known_location(from)?;
        self.known_location(to)?;
        let reachable = self.network.is_reachable(from, to);
        info!("path {} -> {}: {}", from, to, reachable);
        Ok(reachable)
    }

    /// Every location with its roads, sorted by label.
    pub fn road_network(&self) -> Vec<(String, Neighbors)> {
        self.network.display()
    }

    //------------------------------------------------------------------
    // Vehicles
    //------------------------------------------------------------------

    /// Registers a vehicle at `location` heading to `destination`.
    ///
    /// # Arguments
    /// * `id` - Unique, non-empty vehicle id.
    /// * `location` - Current location; must exist in the network.
    /// * `destination` - Destination; must exist in the network.
    /// * `battery_level` - Percent, `0..=100`.
    /// * `distance` - Kilometres from `location` to `destination`, positive.
    pub fn add_vehicle(
        &mut self,
        id: &str,
        location: &str,
        destination: &str,
        battery_level: i64,
        distance: i64,
    ) -> Result<()> {
        let id = non_empty(id)?;
        if self.vehicles.contains_key(id) {
            warn!("vehicle {} already exists", id);
            return Err(FleetError::DuplicateVehicle(id.to_string()));
        }
        let location = non_empty(location)?;
        let destination = non_empty(destination)?;
        self.known_location(location)?;
        self.known_location(destination)?;
        if !(0..=MAX_BATTERY_LEVEL as i64).contains(&battery_level) {
            warn!("vehicle {}: battery level {} out of range", id, battery_level);
            return Err(FleetError::InvalidBattery(battery_level));
        }
        let distance = positive_distance(distance)?;

        let mut vehicle = VehicleRecord::with_id(id);
        vehicle.set_location(location);
        vehicle.set_destination(destination);
        vehicle.set_battery_level(battery_level)?;
        vehicle.set_distance_to_destination(distance as i64)?;

        if !self.vehicles.put(id, vehicle)? {
            return Err(FleetError::DuplicateVehicle(id.to_string()));
        }
        info!(
            "added vehicle {} at {} heading to {} ({}km, {}%)",
            id, location, destination, distance, battery_level
        );
        Ok(())
    }

    /// Moves a vehicle to `location`, `distance` kilometres away from
    /// its destination.
    ///
    /// Nothing changes unless every argument is valid.
    pub fn update_vehicle_location(
        &mut self,
        id: &str,
        location: &str,
        distance: i64,
    ) -> Result<()> {
        self.known_vehicle(id)?;
        let location = non_empty(location)?;
        self.known_location(location)?;
        let distance = positive_distance(distance)?;
        let vehicle = self.vehicle_mut(id)?;
        vehicle.set_location(location);
        vehicle.set_distance_to_destination(distance as i64)?;
        info!("updated location for {} to {} ({}km)", id, location, distance);
        Ok(())
    }

    /// Sends a vehicle to `destination`, `distance` kilometres away
    /// from its current location.
    ///
    /// Nothing changes unless every argument is valid.
    pub fn update_vehicle_destination(
        &mut self,
        id: &str,
        destination: &str,
        distance: i64,
    ) -> Result<()> {
        self.known_vehicle(id)?;
        let destination = non_empty(destination)?;
        self.known_location(destination)?;
        let distance = positive_distance(distance)?;
        let vehicle = self.vehicle_mut(id)?;
        vehicle.set_destination(destination);
        vehicle.set_distance_to_destination(distance as i64)?;
        info!(
            "updated destination for {} to {} ({}km)",
            id, destination, distance
        );
        Ok(())
    }

    /// Takes a vehicle out of the fleet.
    pub fn remove_vehicle(&mut self, id: &str) -> Result<()> {
        let id = non_empty(id)?;
        if !self.vehicles.remove(id) {
            warn!("vehicle {} not found", id);
            return Err(FleetError::VehicleNotFound(id.to_string()));
        }
        info!("removed vehicle {}", id);
        Ok(())
    }

    pub fn vehicle(&self, id: &str) -> Option<&VehicleRecord> {
        self.vehicles.get(id)
    }

    /// Snapshot of every vehicle, in table order.
    pub fn vehicles(&self) -> Vec<&VehicleRecord> {
        self.vehicles.values().collect()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    //------------------------------------------------------------------
    // Recommendations
    //------------------------------------------------------------------

    /// The vehicle closest to its destination, if any.
    pub fn nearest_vehicle(&self) -> Result<Option<&VehicleRecord>> {
        let snapshot = self.vehicles();
        let nearest = ranking::nearest_vehicle(&snapshot)?;
        Ok(nearest)
    }

    /// The vehicle with the most charge, if any.
    pub fn highest_battery_vehicle(&self) -> Option<&VehicleRecord> {
        let snapshot = self.vehicles();
        ranking::highest_battery_vehicle(&snapshot)
    }

    //------------------------------------------------------------------
    // Helpers
    //------------------------------------------------------------------

    fn known_location(&self, label: &str) -> Result<()> {
        if self.network.contains_node(label) {
            Ok(())
        } else {
            warn!("location {} does not exist", label);
            Err(FleetError::UnknownLocation(label.to_string()))
        }
    }

    fn known_vehicle(&self, id: &str) -> Result<()> {
        let id = non_empty(id)?;
        if self.vehicles.contains_key(id) {
            Ok(())
        } else {
            warn!("vehicle {} not found", id);
            Err(FleetError::VehicleNotFound(id.to_string()))
        }
    }

    fn vehicle_mut(&mut self, id: &str) -> Result<&mut VehicleRecord> {
        let id = non_empty(id)?;
        self.vehicles.get_mut(id).ok_or_else(|| {
            warn!("vehicle {} not found", id);
            FleetError::VehicleNotFound(id.to_string())
        })
    }
}

fn non_empty(value: &str) -> Result<&str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FleetError::EmptyIdentifier);
    }
    Ok(value)
}

fn positive_distance(distance: i64) -> Result<u32> {
    match u32::try_from(distance) {
        Ok(km) if km > 0 => Ok(km),
        _ => {
            warn!("distance {} is not a positive integer", distance);
            Err(FleetError::NonPositiveDistance(distance))
        }
    }
}
