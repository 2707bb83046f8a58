//! Bidirectional (level, row, space) ↔ (category, flat index) tables.

use garage_core::{AddressError, Category, SlotId, SpaceAddress};
use smallvec::SmallVec;

use crate::config::LayoutConfig;
use crate::error::LayoutError;

/// One row of one level in the forward table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RowEntry {
    category: Category,
    /// Flat index of the row's first space within `category`.
    first_index: usize,
}

/// Precomputed coordinate tables for a garage layout.
///
/// The forward table holds, per level, one entry per row giving the row's
/// category and the flat index of its first space; a space's slot is that
/// index plus its position in the row. The inverse table holds, per
/// category, the address of every flat index. Both are built once in
/// [`new`](Self::new) and never change.
///
/// # Examples
///
/// ```
/// use garage_core::{Category, SlotId, SpaceAddress};
/// use garage_layout::{CoordinateMap, LayoutConfig};
///
/// let map = CoordinateMap::new(&LayoutConfig::reference()).unwrap();
/// assert_eq!(map.capacity(Category::Large), 80);
///
/// // Level 2, row 5, space 1 (1-based) is the first large space.
/// let addr = SpaceAddress::from_one_based(2, 5, 1).unwrap();
/// let slot = map.to_slot(addr).unwrap();
/// assert_eq!(slot, SlotId::new(Category::Large, 0));
/// assert_eq!(map.to_address(slot).unwrap(), addr);
/// ```
#[derive(Clone, Debug)]
pub struct CoordinateMap {
    slots_per_row: u32,
    levels: Vec<SmallVec<[RowEntry; 8]>>,
    inverse: [Vec<SpaceAddress>; Category::COUNT],
}

impl CoordinateMap {
    /// Validate `layout` and build both tables.
    pub fn new(layout: &LayoutConfig) -> Result<Self, LayoutError> {
        layout.validate()?;

        let per_row = layout.slots_per_row as usize;
        let mut inverse: [Vec<SpaceAddress>; Category::COUNT] = Category::ALL
            .map(|c| Vec::with_capacity(layout.capacity_of(c).unwrap_or(0)));
        let mut next = [0usize; Category::COUNT];
        let mut levels = Vec::with_capacity(layout.levels.len());

        // validate() guarantees level and row numbers fit in u32.
        for (level, spec) in (0u32..).zip(&layout.levels) {
            let mut rows: SmallVec<[RowEntry; 8]> = SmallVec::new();
            let mut row = 0u32;
            for category in Category::ALL {
                for _ in 0..spec.rows_of(category) {
                    let slot = &mut next[category.index()];
                    rows.push(RowEntry {
                        category,
                        first_index: *slot,
                    });
                    inverse[category.index()]
                        .extend((0..layout.slots_per_row).map(|s| SpaceAddress::new(level, row, s)));
                    *slot += per_row;
                    row += 1;
                }
            }
            levels.push(rows);
        }

        Ok(Self {
            slots_per_row: layout.slots_per_row,
            levels,
            inverse,
        })
    }

    /// Translate a 0-based address into its slot.
    ///
    /// Fails if the level, the row on that level, or the space in that row
    /// is not configured.
    pub fn to_slot(&self, address: SpaceAddress) -> Result<SlotId, AddressError> {
        let rows = self
            .levels
            .get(address.level as usize)
            .ok_or(AddressError::LevelOutOfRange {
                address,
                levels: self.level_count(),
            })?;
        let entry = rows
            .get(address.row as usize)
            .ok_or(AddressError::RowOutOfRange {
                address,
                rows: rows.len() as u32,
            })?;
        if address.space >= self.slots_per_row {
            return Err(AddressError::SpaceOutOfRange {
                address,
                spaces: self.slots_per_row,
            });
        }
        Ok(SlotId::new(
            entry.category,
            entry.first_index + address.space as usize,
        ))
    }

    /// Translate a slot into its 0-based address.
    pub fn to_address(&self, slot: SlotId) -> Result<SpaceAddress, AddressError> {
        let table = &self.inverse[slot.category.index()];
        table
            .get(slot.index)
            .copied()
            .ok_or(AddressError::IndexOutOfRange {
                slot,
                capacity: table.len(),
            })
    }

    /// Number of slots in `category`.
    #[inline]
    pub fn capacity(&self, category: Category) -> usize {
        self.inverse[category.index()].len()
    }

    /// Number of slots across all categories.
    pub fn total_slots(&self) -> usize {
        self.inverse.iter().map(Vec::len).sum()
    }

    /// Number of levels.
    #[inline]
    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Rows on a 0-based level, or `None` if it does not exist.
    pub fn rows_in_level(&self, level: u32) -> Option<u32> {
        self.levels.get(level as usize).map(|rows| rows.len() as u32)
    }

    /// Category of a 0-based row, or `None` if it does not exist.
    pub fn row_category(&self, level: u32, row: u32) -> Option<Category> {
        self.levels
            .get(level as usize)?
            .get(row as usize)
            .map(|entry| entry.category)
    }

    /// Spaces in every row.
    #[inline]
    pub fn slots_per_row(&self) -> u32 {
        self.slots_per_row
    }

    /// Addresses of `category` in flat-index order (closest first).
    pub fn addresses(&self, category: Category) -> impl ExactSizeIterator<Item = SpaceAddress> + '_ {
        self.inverse[category.index()].iter().copied()
    }
}
