//! Tunables for the engine.

use serde::{Deserialize, Serialize};

/// Number of slots a fresh vehicle table starts with.
pub const DEFAULT_TABLE_CAPACITY: usize = 100;
/// Occupancy ratio above which the table doubles before inserting.
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.7;
/// Maximum size of a heap built without an explicit bound.
pub const DEFAULT_HEAP_CAPACITY: usize = 100;
/// Upper bound of a battery level, in percent.
pub const MAX_BATTERY_LEVEL: u8 = 100;
/// Battery level of a vehicle registered without one.
pub const DEFAULT_BATTERY_LEVEL: u8 = 100;

/// Sizing policy of a [`KeyedStore`](crate::store::KeyedStore).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Slot count before the first resize. Zero is treated as one.
    pub initial_capacity: usize,
    /// Resize is triggered when `(len + 1) / capacity` would exceed this.
    pub load_factor_threshold: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            initial_capacity: DEFAULT_TABLE_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }
}
