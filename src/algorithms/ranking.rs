//! Vehicle recommendations.
//!
//! Two orderings are offered over a snapshot of the fleet:
//!
//! * ascending distance to destination, produced by draining a
//!   [`PriorityHeap`];
//! * descending battery level, produced by an in-place quicksort with a
//!   Lomuto partition.
//!
//! Neither ordering is stable. The functions accept any slice whose
//! elements borrow as a [`VehicleRecord`]. Results are clones of the
//! elements, so a snapshot of references into a
//! [`KeyedStore`](crate::store::KeyedStore) yields references into the
//! store.

use std::borrow::Borrow;

use crate::algorithms::heap::PriorityHeap;
use crate::error::Result;
use crate::types::vehicle::VehicleRecord;

/// Orders `records` by ascending distance to destination.
///
/// # Errors
/// Only the heap's fatal errors, which cannot occur since the heap is
/// sized to the input.
pub fn sort_by_distance_ascending<R>(records: &[R]) -> Result<Vec<R>>
where
    R: Borrow<VehicleRecord> + Clone,
{
    let mut heap = PriorityHeap::new(records.len());
    for record in records {
        heap.add(record.borrow().distance_to_destination(), record.clone())?;
    }

    let mut sorted = Vec::with_capacity(records.len());
    while !heap.is_empty() {
        let (_, record) = heap.remove_min()?;
        sorted.push(record);
    }
    Ok(sorted)
}

/// The vehicle closest to its destination, or `None` for an empty
/// fleet.
pub fn nearest_vehicle<R>(records: &[R]) -> Result<Option<R>>
where
    R: Borrow<VehicleRecord> + Clone,
{
    if records.is_empty() {
        return Ok(None);
    }
    let nearest = sort_by_distance_ascending(records)?.into_iter().next();
    debug!(
        "nearest vehicle: {:?}",
        nearest.as_ref().map(|v| v.borrow().id())
    );
    Ok(nearest)
}

/// Sorts `records` in place by descending battery level.
///
/// Only the smaller side of each partition is sorted recursively; the
/// larger side is handled by the loop, so stack depth stays
/// logarithmic even when every level is equal.
pub fn sort_by_battery_descending<R: Borrow<VehicleRecord>>(mut records: &mut [R]) {
    while records.len() > 1 {
        let pivot = partition(records);
        let (left, right) = std::mem::take(&mut records).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            sort_by_battery_descending(left);
            records = right;
        } else {
            sort_by_battery_descending(right);
            records = left;
        }
    }
}

/// Moves every record charged at least as much as the last one in
/// front of it, then puts the last one right after them.
///
/// Returns the final index of the pivot.
fn partition<R: Borrow<VehicleRecord>>(records: &mut [R]) -> usize {
    let high = records.len() - 1;
    let pivot = records[high].borrow().battery_level();
    let mut store = 0;
    for j in 0..high {
        if records[j].borrow().battery_level() >= pivot {
            records.swap(store, j);
            store += 1;
        }
    }
    records.swap(store, high);
    store
}

/// The vehicle with the most charge, or `None` for an empty fleet.
///
/// The sort runs on a copy; `records` keeps its order.
pub fn highest_battery_vehicle<R>(records: &[R]) -> Option<R>
where
    R: Borrow<VehicleRecord> + Clone,
{
    let mut copy = records.to_vec();
    sort_by_battery_descending(&mut copy);
    let best = copy.into_iter().next();
    debug!(
        "highest battery vehicle: {:?}",
        best.as_ref().map(|v| v.borrow().id())
    );
    best
}
