//! Error taxonomy shared by every component of the engine.
//!
//! Two classes of failure exist:
//!
//! * **Rejected**: a request was declined for a business reason (an
//!   unknown location, a duplicate vehicle). The caller is expected to
//!   report it and carry on.
//! * **Fatal**: a precondition was violated (a full hash table, a heap
//!   pushed past its capacity, a battery level of 140%). These should
//!   propagate.
//!
//! The low-level structures signal most rejections with `bool` or
//! [`Option`] returns and only ever produce fatal variants. The
//! [`FleetState`](crate::fleet_state::FleetState) context produces both.

use thiserror::Error;

/// Errors raised by the fleet engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("identifier cannot be empty")]
    EmptyIdentifier,

    #[error("location {0} already exists")]
    DuplicateLocation(String),

    #[error("location {0} does not exist in road network")]
    UnknownLocation(String),

    #[error("locations must be different: {0}")]
    SameLocation(String),

    #[error("distance must be a positive integer, got {0}")]
    NonPositiveDistance(i64),

    #[error("vehicle {0} already exists")]
    DuplicateVehicle(String),

    #[error("vehicle {0} not found")]
    VehicleNotFound(String),

    #[error("hash table is full (capacity {capacity})")]
    TableFull { capacity: usize },

    #[error("heap is full (max size {max_size})")]
    HeapFull { max_size: usize },

    #[error("heap is empty")]
    HeapEmpty,

    #[error("battery level must be between 0 and 100, got {0}")]
    InvalidBattery(i64),

    #[error("distance cannot be negative, got {0}")]
    InvalidDistance(i64),
}

impl FleetError {
    /// Returns `true` for violated invariants the caller should not try
    /// to recover from locally.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FleetError::TableFull { .. }
                | FleetError::HeapFull { .. }
                | FleetError::HeapEmpty
                | FleetError::InvalidBattery(_)
                | FleetError::InvalidDistance(_)
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FleetError>;
