//! Fixed-capacity slot storage

use super::{EntityKind, MapError};

/// A record that can sit in a [`SlotStore`].
///
/// `Default` must produce the empty (absent) record.
pub trait Slot: Default {
    const KIND: EntityKind;

    fn is_absent(&self) -> bool;

    fn is_present(&self) -> bool {
        !self.is_absent()
    }
}

/// Array of entity slots with first-free-slot reuse.
///
/// Allocation scans linearly from slot 0, so the lowest freed slot is always
/// reused first. Iteration visits every slot, absent ones included; callers
/// decide what to skip.
#[derive(Debug, Clone)]
pub struct SlotStore<T> {
    slots: Vec<T>,
}

impl<T: Slot> SlotStore<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of non-empty slots
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_present()).count()
    }

    /// Index of the first empty slot
    pub fn first_free(&self) -> Result<usize, MapError> {
        self.slots
            .iter()
            .position(|s| s.is_absent())
            .ok_or(MapError::CapacityExceeded {
                kind: T::KIND,
                capacity: self.capacity(),
            })
    }

    /// Store `record` in the first empty slot
    pub fn allocate(&mut self, record: T) -> Result<usize, MapError> {
        debug_assert!(record.is_present(), "allocating an absent record");
        let slot = self.first_free()?;
        self.slots[slot] = record;
        Ok(slot)
    }

    /// Empty a slot, returning the record it held
    pub fn free(&mut self, slot: usize) -> Option<T> {
        let entry = self.slots.get_mut(slot)?;
        if entry.is_absent() {
            return None;
        }
        Some(std::mem::take(entry))
    }

    /// Record at `slot`, or `None` if the slot is empty or out of range
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).filter(|s| s.is_present())
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot).filter(|s| s.is_present())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots.iter().enumerate()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.slots.iter_mut().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GridPoint, Wall};

    fn wall(x: i32) -> Wall {
        Wall::new(GridPoint::new(x, 0), GridPoint::new(x, 1))
    }

    #[test]
    fn test_allocate_fills_lowest_slot() {
        let mut store = SlotStore::<Wall>::with_capacity(3);
        assert_eq!(store.allocate(wall(0)), Ok(0));
        assert_eq!(store.allocate(wall(1)), Ok(1));
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut store = SlotStore::<Wall>::with_capacity(3);
        for i in 0..3 {
            store.allocate(wall(i)).unwrap();
        }
        assert!(store.free(1).is_some());
        assert!(store.get(1).is_none());

        let slot = store.allocate(wall(9)).unwrap();
        assert_eq!(slot, 1);
        assert!(store.get(slot).is_some_and(|w| w.is_present()));
        assert_eq!(store.get(slot).unwrap().start.x, 9);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut store = SlotStore::<Wall>::with_capacity(2);
        store.allocate(wall(0)).unwrap();
        store.allocate(wall(1)).unwrap();
        assert_eq!(
            store.allocate(wall(2)),
            Err(MapError::CapacityExceeded { kind: EntityKind::Wall, capacity: 2 })
        );
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_never_exceeds_capacity_under_churn() {
        let mut store = SlotStore::<Wall>::with_capacity(5);
        let mut live: Vec<usize> = Vec::new();
        // Deterministic allocate/free interleaving
        for step in 0..200 {
            if step % 3 == 2 && !live.is_empty() {
                let victim = live.remove((step * 7) % live.len());
                assert!(store.free(victim).is_some());
            } else if let Ok(slot) = store.allocate(wall(step as i32)) {
                assert!(!live.contains(&slot));
                live.push(slot);
            }
            assert!(store.live_count() <= store.capacity());
            assert_eq!(store.live_count(), live.len());
        }
    }

    #[test]
    fn test_free_out_of_range_and_twice() {
        let mut store = SlotStore::<Wall>::with_capacity(1);
        assert!(store.free(5).is_none());
        store.allocate(wall(0)).unwrap();
        assert!(store.free(0).is_some());
        assert!(store.free(0).is_none());
    }

    #[test]
    fn test_iter_visits_every_slot() {
        let mut store = SlotStore::<Wall>::with_capacity(4);
        store.allocate(wall(0)).unwrap();
        assert_eq!(store.iter().count(), 4);
        assert_eq!(store.iter().filter(|(_, w)| w.is_present()).count(), 1);
    }
}
