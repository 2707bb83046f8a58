//! Per-category occupancy arrays.
//!
//! One fixed-size `Vec<Occupancy>` per category, indexed by flat slot
//! index. A slot is free exactly when its entry's start time is
//! [`Timestamp::VACANT`]. Entries are always written whole, so a reader
//! never sees a start time paired with a stale occupant.

use garage_core::{AddressError, AllocError, Category, SlotId, Timestamp};
use garage_layout::CoordinateMap;

/// Who is parked in a slot and since when.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupancy {
    /// Start of the stay.
    pub started_at: Timestamp,
    /// Category of the car: `Handicapped` for placard holders, otherwise
    /// its size. Independent of the space category.
    pub occupant: Category,
}

impl Occupancy {
    /// Entry of a free slot.
    pub const VACANT: Occupancy = Occupancy {
        started_at: Timestamp::VACANT,
        occupant: Category::Small,
    };

    /// `true` for a free slot's entry.
    #[inline]
    pub const fn is_vacant(&self) -> bool {
        self.started_at.is_vacant()
    }
}

/// Occupancy state for every slot in the garage.
///
/// Array lengths are fixed at construction. A free counter per category
/// is kept in step with the arrays so that [`free_count`](Self::free_count)
/// is O(1) and a full category is rejected without scanning.
#[derive(Clone, Debug)]
pub struct OccupancyTable {
    slots: [Vec<Occupancy>; Category::COUNT],
    free: [usize; Category::COUNT],
}

impl OccupancyTable {
    /// An all-free table with the given per-category capacities, in
    /// [`Category::index`] order.
    pub fn new(capacities: [usize; Category::COUNT]) -> Self {
        Self {
            slots: capacities.map(|n| vec![Occupancy::VACANT; n]),
            free: capacities,
        }
    }

    /// An all-free table sized for `map`.
    pub fn for_map(map: &CoordinateMap) -> Self {
        Self::new(Category::ALL.map(|c| map.capacity(c)))
    }

    /// Number of slots in `category`.
    #[inline]
    pub fn capacity(&self, category: Category) -> usize {
        self.slots[category.index()].len()
    }

    /// Number of free slots in `category`.
    #[inline]
    pub fn free_count(&self, category: Category) -> usize {
        self.free[category.index()]
    }

    /// Number of occupied slots in `category`.
    #[inline]
    pub fn occupied_count(&self, category: Category) -> usize {
        self.capacity(category) - self.free_count(category)
    }

    /// Current entry of a slot: `Ok(None)` if free.
    pub fn get(&self, slot: SlotId) -> Result<Option<Occupancy>, AddressError> {
        let entry = self.entry(slot)?;
        Ok((!entry.is_vacant()).then_some(*entry))
    }

    /// Lowest free index in `category`, i.e. its closest free slot.
    pub fn first_free(&self, category: Category) -> Option<usize> {
        if self.free[category.index()] == 0 {
            return None;
        }
        self.slots[category.index()]
            .iter()
            .position(Occupancy::is_vacant)
    }

    /// Occupied slots of `category` in index order.
    pub fn occupied(&self, category: Category) -> impl Iterator<Item = (SlotId, Occupancy)> + '_ {
        self.slots[category.index()]
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_vacant())
            .map(move |(i, o)| (SlotId::new(category, i), *o))
    }

    /// Mark a free slot occupied.
    ///
    /// Fails without writing if the slot does not exist, is already
    /// occupied, or `entry` carries the vacant sentinel.
    pub(crate) fn occupy(&mut self, slot: SlotId, entry: Occupancy) -> Result<(), AllocError> {
        if entry.is_vacant() {
            return Err(AllocError::InvalidTimestamp);
        }
        let current = self.entry_mut(slot)?;
        if !current.is_vacant() {
            return Err(AllocError::SlotOccupied { slot });
        }
        *current = entry;
        self.free[slot.category.index()] -= 1;
        Ok(())
    }

    /// Mark an occupied slot free and return what was there.
    pub(crate) fn vacate(&mut self, slot: SlotId) -> Result<Occupancy, AllocError> {
        let current = self.entry_mut(slot)?;
        if current.is_vacant() {
            return Err(AllocError::SlotAlreadyFree { slot });
        }
        let previous = std::mem::replace(current, Occupancy::VACANT);
        self.free[slot.category.index()] += 1;
        Ok(previous)
    }

    fn entry(&self, slot: SlotId) -> Result<&Occupancy, AddressError> {
        let table = &self.slots[slot.category.index()];
        table.get(slot.index).ok_or(AddressError::IndexOutOfRange {
            slot,
            capacity: table.len(),
        })
    }

    fn entry_mut(&mut self, slot: SlotId) -> Result<&mut Occupancy, AddressError> {
        let table = &mut self.slots[slot.category.index()];
        let capacity = table.len();
        table
            .get_mut(slot.index)
            .ok_or(AddressError::IndexOutOfRange { slot, capacity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parked(at: u64, occupant: Category) -> Occupancy {
        Occupancy {
            started_at: Timestamp(at),
            occupant,
        }
    }

    #[test]
    fn new_table_is_all_free() {
        let table = OccupancyTable::new([2, 3, 0]);
        assert_eq!(table.capacity(Category::Small), 3);
        assert_eq!(table.free_count(Category::Handicapped), 2);
        assert_eq!(table.free_count(Category::Large), 0);
        assert_eq!(table.first_free(Category::Small), Some(0));
        assert_eq!(table.first_free(Category::Large), None);
    }

    #[test]
    fn occupy_and_vacate_track_free_count() {
        let mut table = OccupancyTable::new([0, 3, 0]);
        let slot = SlotId::new(Category::Small, 0);
        table.occupy(slot, parked(100, Category::Small)).unwrap();
        assert_eq!(table.free_count(Category::Small), 2);
        assert_eq!(table.occupied_count(Category::Small), 1);
        assert_eq!(table.first_free(Category::Small), Some(1));
        assert_eq!(table.get(slot), Ok(Some(parked(100, Category::Small))));

        assert_eq!(table.vacate(slot), Ok(parked(100, Category::Small)));
        assert_eq!(table.free_count(Category::Small), 3);
        assert_eq!(table.get(slot), Ok(None));
    }

    #[test]
    fn first_free_finds_gap() {
        let mut table = OccupancyTable::new([0, 0, 4]);
        for i in 0..4 {
            table
                .occupy(SlotId::new(Category::Large, i), parked(1, Category::Large))
                .unwrap();
        }
        assert_eq!(table.first_free(Category::Large), None);
        table.vacate(SlotId::new(Category::Large, 2)).unwrap();
        assert_eq!(table.first_free(Category::Large), Some(2));
    }

    #[test]
    fn vacate_free_slot_fails() {
        let mut table = OccupancyTable::new([1, 0, 0]);
        let slot = SlotId::new(Category::Handicapped, 0);
        assert_eq!(table.vacate(slot), Err(AllocError::SlotAlreadyFree { slot }));
        assert_eq!(table.free_count(Category::Handicapped), 1);
    }

    #[test]
    fn out_of_range_slot_fails() {
        let mut table = OccupancyTable::new([1, 1, 1]);
        let slot = SlotId::new(Category::Small, 5);
        assert!(matches!(
            table.vacate(slot),
            Err(AllocError::InvalidAddress(AddressError::IndexOutOfRange { capacity: 1, .. }))
        ));
        assert!(table.get(slot).is_err());
    }

    #[test]
    fn occupy_taken_slot_fails() {
        let mut table = OccupancyTable::new([0, 1, 0]);
        let slot = SlotId::new(Category::Small, 0);
        table.occupy(slot, parked(5, Category::Small)).unwrap();
        assert_eq!(
            table.occupy(slot, parked(6, Category::Handicapped)),
            Err(AllocError::SlotOccupied { slot })
        );
        assert_eq!(table.get(slot), Ok(Some(parked(5, Category::Small))));
        assert_eq!(table.free_count(Category::Small), 0);
    }

    #[test]
    fn occupy_rejects_sentinel_entry() {
        let mut table = OccupancyTable::new([0, 1, 0]);
        let slot = SlotId::new(Category::Small, 0);
        assert_eq!(
            table.occupy(slot, Occupancy::VACANT),
            Err(AllocError::InvalidTimestamp)
        );
        assert_eq!(table.free_count(Category::Small), 1);
    }

    #[test]
    fn occupied_iterates_in_index_order() {
        let mut table = OccupancyTable::new([0, 5, 0]);
        for i in [3, 1] {
            table
                .occupy(SlotId::new(Category::Small, i), parked(i as u64, Category::Small))
                .unwrap();
        }
        let indices: Vec<usize> = table.occupied(Category::Small).map(|(s, _)| s.index).collect();
        assert_eq!(indices, vec![1, 3]);
    }
}
