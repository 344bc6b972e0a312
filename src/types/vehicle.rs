//! Struct definitions and implementations for [`VehicleRecord`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BATTERY_LEVEL, MAX_BATTERY_LEVEL};
use crate::error::{FleetError, Result};

/// A vehicle of the fleet.
///
/// Location and destination are labels of nodes in the road network.
/// The record itself does not check them against a network; that is
/// done by whoever owns both, see
/// [`FleetState`](crate::fleet_state::FleetState).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    id: String,
    location: Option<String>,
    destination: Option<String>,
    /// Kilometres left to the destination.
    distance_to_destination: u32,
    /// Percent, within `0..=100`.
    battery_level: u8,
}

impl VehicleRecord {
    /// Creates a vehicle with a distance of zero.
    ///
    /// Fails with [`FleetError::InvalidBattery`] if `battery_level` is
    /// above 100.
    pub fn new(
        id: &str,
        location: Option<&str>,
        destination: Option<&str>,
        battery_level: u8,
    ) -> Result<VehicleRecord> {
        let mut vehicle = VehicleRecord::with_id(id);
        vehicle.location = location.map(str::to_string);
        vehicle.destination = destination.map(str::to_string);
        vehicle.set_battery_level(battery_level as i64)?;
        Ok(vehicle)
    }

    /// A vehicle with no position, no destination and a full battery.
    pub fn with_id(id: &str) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            location: None,
            destination: None,
            distance_to_destination: 0,
            battery_level: DEFAULT_BATTERY_LEVEL,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn distance_to_destination(&self) -> u32 {
        self.distance_to_destination
    }

    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn set_location(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }

    pub fn set_destination(&mut self, destination: &str) {
        self.destination = Some(destination.to_string());
    }

    /// Fails with [`FleetError::InvalidDistance`] for negative values
    /// and for values that do not fit the stored width. The record is
    /// left unchanged on failure.
    pub fn set_distance_to_destination(&mut self, distance: i64) -> Result<()> {
        let distance = u32::try_from(distance).map_err(|_| {
            error!("vehicle {}: invalid distance {}", self.id, distance);
            FleetError::InvalidDistance(distance)
        })?;
        self.distance_to_destination = distance;
        Ok(())
    }

    /// Fails with [`FleetError::InvalidBattery`] outside `0..=100`. The
    /// record is left unchanged on failure.
    pub fn set_battery_level(&mut self, level: i64) -> Result<()> {
        if !(0..=MAX_BATTERY_LEVEL as i64).contains(&level) {
            error!("vehicle {}: invalid battery level {}", self.id, level);
            return Err(FleetError::InvalidBattery(level));
        }
        self.battery_level = level as u8;
        Ok(())
    }
}

impl fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle {}: Location={}, Destination={}, Distance={}km, Battery={}%",
            self.id,
            self.location.as_deref().unwrap_or("None"),
            self.destination.as_deref().unwrap_or("None"),
            self.distance_to_destination,
            self.battery_level
        )
    }
}

#[cfg(test)]
mod vehicle_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let vehicle = VehicleRecord::with_id("V1");
        assert_eq!(vehicle.id(), "V1");
        assert_eq!(vehicle.location(), None);
        assert_eq!(vehicle.distance_to_destination(), 0);
        assert_eq!(vehicle.battery_level(), 100);
    }

    #[test]
    fn test_new_rejects_overcharged_battery() {
        let res = VehicleRecord::new("V1", Some("A"), Some("B"), 101);
        assert_eq!(res, Err(FleetError::InvalidBattery(101)));
    }

    #[test]
    fn test_battery_bounds() {
        let mut vehicle = VehicleRecord::new("V1", Some("A"), Some("B"), 50).unwrap();
        assert!(vehicle.set_battery_level(0).is_ok());
        assert!(vehicle.set_battery_level(100).is_ok());
        assert_eq!(
            vehicle.set_battery_level(-1),
            Err(FleetError::InvalidBattery(-1))
        );
        assert_eq!(
            vehicle.set_battery_level(150),
            Err(FleetError::InvalidBattery(150))
        );
        assert_eq!(vehicle.battery_level(), 100);
    }

    #[test]
    fn test_negative_distance_is_rejected() {
        let mut vehicle = VehicleRecord::with_id("V1");
        vehicle.set_distance_to_destination(12).unwrap();
        let err = vehicle.set_distance_to_destination(-3).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(vehicle.distance_to_destination(), 12);
    }

    #[test]
    fn test_display() {
        let mut vehicle = VehicleRecord::new("V7", Some("Depot"), Some("Harbor"), 64).unwrap();
        vehicle.set_distance_to_destination(18).unwrap();
        assert_eq!(
            vehicle.to_string(),
            "Vehicle V7: Location=Depot, Destination=Harbor, Distance=18km, Battery=64%"
        );
    }

    #[test]
    fn test_serde_snapshot() {
        let mut vehicle = VehicleRecord::new("V2", Some("A"), Some("C"), 90).unwrap();
        vehicle.set_destination("B");
        let json = serde_json::to_string(&vehicle).unwrap();
        let back: VehicleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vehicle);
        assert_eq!(back.destination(), Some("B"));
    }
}
