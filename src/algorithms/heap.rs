//! A bounded binary min-heap.
//!
//! Entries live in a flat vector with the children of slot `i` at
//! `2i + 1` and `2i + 2`. The heap never holds more than the maximum
//! size it was built with.

use crate::config::DEFAULT_HEAP_CAPACITY;
use crate::error::{FleetError, Result};

/// An entry of the heap.
#[derive(Debug, Clone)]
struct HeapEntry<T> {
    priority: u32,
    value: T,
}

/// A min-heap that hands out the lowest priority first.
///
/// Entries with equal priority come out in whatever order the sift
/// operations leave them in.
#[derive(Debug, Clone)]
pub struct PriorityHeap<T> {
    entries: Vec<HeapEntry<T>>,
    max_size: usize,
}

impl<T> Default for PriorityHeap<T> {
    fn default() -> Self {
        PriorityHeap::new(DEFAULT_HEAP_CAPACITY)
    }
}

impl<T> PriorityHeap<T> {
    /// Creates an empty heap holding at most `max_size` entries.
    pub fn new(max_size: usize) -> PriorityHeap<T> {
        PriorityHeap {
            entries: Vec::with_capacity(max_size),
            max_size,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The entry `remove_min` would return next.
    pub fn peek(&self) -> Option<(u32, &T)> {
        self.entries
            .first()
            .map(|entry| (entry.priority, &entry.value))
    }

    /// Inserts `value` with `priority`.
    ///
    /// # Errors
    /// [`FleetError::HeapFull`] once the heap holds `max_size` entries.
    pub fn add(&mut self, priority: u32, value: T) -> Result<()> {
        if self.entries.len() >= self.max_size {
            error!("heap is full (max size {})", self.max_size);
            return Err(FleetError::HeapFull {
                max_size: self.max_size,
            });
        }
        self.entries.push(HeapEntry { priority, value });
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Removes and returns the entry with the lowest priority.
    ///
    /// # Errors
    /// [`FleetError::HeapEmpty`] if there is nothing to remove.
    pub fn remove_min(&mut self) -> Result<(u32, T)> {
        if self.entries.is_empty() {
            error!("remove_min on an empty heap");
            return Err(FleetError::HeapEmpty);
        }
        let root = self.entries.swap_remove(0);
        self.sift_down(0);
        Ok((root.priority, root.value))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].priority >= self.entries[parent].priority {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let count = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < count && self.entries[left].priority < self.entries[smallest].priority {
                smallest = left;
            }
            if right < count && self.entries[right].priority < self.entries[smallest].priority {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }
}
