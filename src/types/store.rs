//! Keyed storage for the fleet.
//!
//! [`KeyedStore`] is an open-addressing hash table with linear probing.
//! Deleted entries leave a tombstone behind so that probe chains running
//! through them stay intact; tombstones are dropped the next time the
//! table is rebuilt.
//!
//! The table grows by doubling, before an insertion that would push
//! the load factor past the configured threshold.

use crate::config::{StoreConfig, DEFAULT_LOAD_FACTOR_THRESHOLD};
use crate::error::{FleetError, Result};

/// State of one table slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<V> {
    /// Never used since the last rebuild.
    Empty,
    /// Holds a live entry.
    Occupied { key: String, value: V },
    /// Held `key` until it was removed.
    Tombstone { key: String },
}

/// Outcome of a probe sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Probe {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent; this is where it would be written.
    Vacant(usize),
}

/// An open-addressing hash table keyed by strings.
#[derive(Debug, Clone)]
pub struct KeyedStore<V> {
    slots: Vec<Slot<V>>,
    count: usize,
    load_factor_threshold: f64,
}

impl<V> Default for KeyedStore<V> {
    fn default() -> Self {
        KeyedStore::with_config(StoreConfig::default())
    }
}

impl<V> KeyedStore<V> {
    /// Creates a table with the default capacity and threshold.
    pub fn new() -> KeyedStore<V> {
        KeyedStore::default()
    }

    /// Creates a table with `capacity` slots and the default threshold.
    pub fn with_capacity(capacity: usize) -> KeyedStore<V> {
        KeyedStore::with_config(StoreConfig {
            initial_capacity: capacity,
            ..StoreConfig::default()
        })
    }

    /// Creates a table from `config`.
    ///
    /// A threshold outside `(0, 1]` is replaced by
    /// [`DEFAULT_LOAD_FACTOR_THRESHOLD`].
    pub fn with_config(config: StoreConfig) -> KeyedStore<V> {
        let threshold = config.load_factor_threshold;
        let load_factor_threshold = if threshold > 0.0 && threshold <= 1.0 {
            threshold
        } else {
            warn!(
                "load factor threshold {} out of range, using {}",
                threshold, DEFAULT_LOAD_FACTOR_THRESHOLD
            );
            DEFAULT_LOAD_FACTOR_THRESHOLD
        };
        KeyedStore {
            slots: empty_slots(config.initial_capacity.max(1)),
            count: 0,
            load_factor_threshold,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots, live or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Occupancy ratio above which the table doubles.
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Start index of `key`'s probe sequence: the sum of its character
    /// codes modulo the capacity.
    pub fn hash(&self, key: &str) -> usize {
        key.chars()
            .fold(0usize, |sum, c| sum.wrapping_add(c as usize))
            % self.capacity()
    }

    /// Walks the table from `start_index`, wrapping around.
    ///
    /// The walk ends at the slot holding `key` or at the first empty
    /// slot. The first tombstone met on the way is remembered and
    /// preferred as the insertion slot, but the walk continues past it
    /// so that a live copy of `key` further down the chain is still
    /// found.
    ///
    /// # Errors
    /// [`FleetError::TableFull`] if a whole cycle passes without an
    /// empty slot, a tombstone or the key.
    pub fn probe(&self, key: &str, start_index: usize) -> Result<Probe> {
        let capacity = self.capacity();
        let mut index = start_index % capacity;
        let mut reusable = None;

        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return Ok(Probe::Vacant(reusable.unwrap_or(index))),
                Slot::Occupied { key: stored, .. } if stored == key => {
                    return Ok(Probe::Found(index))
                }
                Slot::Tombstone { .. } if reusable.is_none() => reusable = Some(index),
                _ => {}
            }
            index = (index + 1) % capacity;
        }

        match reusable {
            Some(index) => Ok(Probe::Vacant(index)),
            None => {
                error!("hash table is full (capacity {})", capacity);
                Err(FleetError::TableFull { capacity })
            }
        }
    }

    /// Inserts `value` under `key`.
    ///
    /// # Returns
    /// `Ok(false)` without touching the table if `key` is already
    /// present, `Ok(true)` once the entry is written.
    ///
    /// # Errors
    /// [`FleetError::TableFull`] if no slot can be found. This cannot
    /// happen while the threshold is below 1.
    pub fn put(&mut self, key: &str, value: V) -> Result<bool> {
        if let Probe::Found(_) = self.probe(key, self.hash(key))? {
            warn!("key {} already present", key);
            return Ok(false);
        }

        let projected = (self.count + 1) as f64 / self.capacity() as f64;
        if projected > self.load_factor_threshold {
            self.resize(self.capacity() * 2)?;
        }

        self.insert(key.to_string(), value)
    }

    /// Writes `key` into its probe slot without the load-factor check.
    fn insert(&mut self, key: String, value: V) -> Result<bool> {
        let index = match self.probe(&key, self.hash(&key))? {
            Probe::Vacant(index) => index,
            Probe::Found(_) => return Ok(false),
        };
        debug!("storing {} at slot {}", key, index);
        self.slots[index] = Slot::Occupied { key, value };
        self.count += 1;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key, self.hash(key)) {
            Ok(Probe::Found(index)) => match &self.slots[index] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.probe(key, self.hash(key)) {
            Ok(Probe::Found(index)) => match &mut self.slots[index] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Turns the entry for `key` into a tombstone.
    ///
    /// Returns `false` if `key` is not present.
    pub fn remove(&mut self, key: &str) -> bool {
        let index = match self.probe(key, self.hash(key)) {
            Ok(Probe::Found(index)) => index,
            _ => return false,
        };
        self.slots[index] = Slot::Tombstone {
            key: key.to_string(),
        };
        self.count -= 1;
        debug!("removed {} from slot {}", key, index);
        true
    }

    /// Rebuilds the table with `new_capacity` slots.
    ///
    /// Live entries are re-inserted along their probe sequences in the
    /// new table; tombstones are discarded and the count is rebuilt
    /// from scratch. Shrinking below the live count fails with
    /// [`FleetError::TableFull`] and leaves the table untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        info!(
            "resizing table from {} to {} slots ({} live entries)",
            self.capacity(),
            new_capacity,
            self.count
        );
        let new_capacity = new_capacity.max(1);
        if new_capacity < self.count {
            error!(
                "cannot fit {} live entries into {} slots",
                self.count, new_capacity
            );
            return Err(FleetError::TableFull {
                capacity: new_capacity,
            });
        }
        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.count = 0;
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.insert(key, value)?;
            }
        }
        Ok(())
    }

    /// Live entries as `(slot index, key, value)`, in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str, &V)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { key, value } => Some((index, key.as_str(), value)),
                _ => None,
            })
    }

    /// Live values, in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(|(_, _, value)| value)
    }

    /// Read-only view of the raw slots.
    pub fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

#[cfg(test)]
mod store_tests {
    use super::*;

    fn no_resize(capacity: usize) -> StoreConfig {
        StoreConfig {
            initial_capacity: capacity,
            load_factor_threshold: 1.0,
        }
    }

    #[test]
    fn test_put_get() {
        let mut store = KeyedStore::new();
        assert!(store.put("V1", 10).unwrap());
        assert!(store.put("V2", 20).unwrap());
        assert_eq!(store.get("V1"), Some(&10));
        assert_eq!(store.get("V2"), Some(&20));
        assert_eq!(store.get("V3"), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_put_is_rejected() {
        let mut store = KeyedStore::new();
        assert!(store.put("V1", 10).unwrap());
        assert!(!store.put("V1", 99).unwrap());
        assert_eq!(store.get("V1"), Some(&10));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_hash_is_char_sum() {
        let store: KeyedStore<u8> = KeyedStore::with_capacity(10);
        // 'a' = 97, 'b' = 98
        assert_eq!(store.hash("a"), 7);
        assert_eq!(store.hash("ab"), 5);
        assert_eq!(store.hash("ba"), store.hash("ab"));
    }

    #[test]
    fn test_collisions_probe_forward() {
        let mut store = KeyedStore::with_capacity(10);
        store.put("ab", 1).unwrap();
        store.put("ba", 2).unwrap();

        assert_eq!(store.probe("ab", 5).unwrap(), Probe::Found(5));
        assert_eq!(store.probe("ba", 5).unwrap(), Probe::Found(6));
        assert_eq!(store.probe("zz", 5).unwrap(), Probe::Vacant(7));
    }

    #[test]
    fn test_probe_wraps_around() {
        let mut store = KeyedStore::with_config(no_resize(4));
        // 'c' = 99 -> 3, 'g' = 103 -> 3
        store.put("c", 1).unwrap();
        store.put("g", 2).unwrap();
        assert_eq!(store.probe("g", 3).unwrap(), Probe::Found(0));
        assert_eq!(store.get("g"), Some(&2));
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut store = KeyedStore::with_capacity(10);
        store.put("ab", 1).unwrap();
        store.put("ba", 2).unwrap();

        assert!(store.remove("ab"));
        assert!(!store.remove("ab"));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.slots()[5],
            Slot::Tombstone {
                key: "ab".to_string()
            }
        );
        // the chain still leads past the tombstone
        assert_eq!(store.get("ba"), Some(&2));
        assert!(!store.put("ba", 3).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reput_after_remove() {
        let mut store = KeyedStore::with_capacity(10);
        store.put("ab", 1).unwrap();
        store.put("ba", 2).unwrap();
        store.remove("ab");

        assert!(store.put("ab", 7).unwrap());
        assert_eq!(store.get("ab"), Some(&7));
        assert_eq!(store.probe("ab", 5).unwrap(), Probe::Found(5));
        assert_eq!(store.len(), 2);

        // a different key can reuse the tombstone too; 'U' = 85 -> 5
        store.remove("ab");
        assert!(store.put("U", 9).unwrap());
        assert_eq!(store.probe("U", 5).unwrap(), Probe::Found(5));
        assert_eq!(store.get("ab"), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_no_resize_below_threshold() {
        let mut store = KeyedStore::new();
        for i in 0..60 {
            assert!(store.put(&format!("vehicle-{}", i), i).unwrap());
        }
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.len(), 60);
        for i in 0..60 {
            assert_eq!(store.get(&format!("vehicle-{}", i)), Some(&i));
        }
    }

    #[test]
    fn test_resize_doubles_and_keeps_entries() {
        let mut store = KeyedStore::with_capacity(4);
        store.put("a", 1).unwrap();
        store.put("b", 2).unwrap();
        assert_eq!(store.capacity(), 4);

        // 3 / 4 would exceed 0.7
        store.put("c", 3).unwrap();
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.len(), 3);
        for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
            assert_eq!(store.get(key), Some(&value));
        }
    }

    #[test]
    fn test_resize_drops_tombstones() {
        let mut store = KeyedStore::with_capacity(10);
        store.put("ab", 1).unwrap();
        store.put("ba", 2).unwrap();
        store.put("cd", 3).unwrap();
        store.remove("ba");

        store.resize(20).unwrap();
        assert_eq!(store.capacity(), 20);
        assert_eq!(store.len(), 2);
        assert!(store
            .slots()
            .iter()
            .all(|slot| !matches!(slot, Slot::Tombstone { .. })));
        assert_eq!(store.get("ab"), Some(&1));
        assert_eq!(store.get("cd"), Some(&3));
        assert_eq!(store.get("ba"), None);
    }

    #[test]
    fn test_many_inserts_survive_repeated_resizes() {
        let mut store = KeyedStore::with_capacity(2);
        for i in 0..500 {
            store.put(&format!("V{}", i), i).unwrap();
        }
        for i in (0..500).step_by(3) {
            assert!(store.remove(&format!("V{}", i)));
        }
        for i in 0..500 {
            let expected = if i % 3 == 0 { None } else { Some(&i) };
            assert_eq!(store.get(&format!("V{}", i)), expected);
        }
        assert!(store.load_factor() <= 0.7);
    }

    #[test]
    fn test_out_of_range_threshold_falls_back_to_default() {
        for threshold in [0.0, -1.0, 1.5, f64::NAN] {
            let mut store = KeyedStore::with_config(StoreConfig {
                initial_capacity: 2,
                load_factor_threshold: threshold,
            });
            assert_eq!(store.load_factor_threshold(), DEFAULT_LOAD_FACTOR_THRESHOLD);

            for i in 0..18 {
                assert!(store.put(&format!("V{}", i), i).unwrap());
            }
            assert_eq!(store.len(), 18);
            assert_eq!(store.capacity(), 32);
            for i in 0..18 {
                assert_eq!(store.get(&format!("V{}", i)), Some(&i));
            }
        }
    }

    #[test]
    fn test_resize_does_not_cascade() {
        let mut store = KeyedStore::with_capacity(16);
        for i in 0..10 {
            store.put(&format!("V{}", i), i).unwrap();
        }
        // 10 / 12 is above the threshold, yet the rebuild keeps its size
        store.resize(12).unwrap();
        assert_eq!(store.capacity(), 12);
        assert_eq!(store.len(), 10);

        let err = store.resize(4).unwrap_err();
        assert_eq!(err, FleetError::TableFull { capacity: 4 });
        assert_eq!(store.capacity(), 12);
        assert_eq!(store.get("V7"), Some(&7));
    }

    #[test]
    fn test_full_table_is_detected() {
        let mut store = KeyedStore::with_config(no_resize(2));
        store.put("a", 1).unwrap();
        store.put("b", 2).unwrap();

        let err = store.put("c", 3).unwrap_err();
        assert_eq!(err, FleetError::TableFull { capacity: 2 });
        assert!(err.is_fatal());
        assert_eq!(store.get("c"), None);
        assert!(!store.remove("c"));
    }

    #[test]
    fn test_entries_in_slot_order() {
        let mut store = KeyedStore::with_capacity(10);
        // a -> 7, b -> 8, c -> 9, d -> 0
        for key in ["a", "b", "c", "d"] {
            store.put(key, key.to_uppercase()).unwrap();
        }
        let entries: Vec<(usize, &str)> = store.entries().map(|(i, k, _)| (i, k)).collect();
        assert_eq!(entries, vec![(0, "d"), (7, "a"), (8, "b"), (9, "c")]);
        let values: Vec<&String> = store.values().collect();
        assert_eq!(values, vec!["D", "A", "B", "C"]);
    }

    #[test]
    fn test_get_mut() {
        let mut store = KeyedStore::new();
        store.put("V1", 1).unwrap();
        if let Some(value) = store.get_mut("V1") {
            *value = 5;
        }
        assert_eq!(store.get("V1"), Some(&5));
        assert!(store.get_mut("V2").is_none());
        assert!(store.contains_key("V1"));
    }
}
