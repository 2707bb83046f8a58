//! Layout configuration.

use garage_core::Category;

use crate::error::LayoutError;

/// Row counts for one level of the garage.
///
/// Rows are numbered in declaration order within the level: handicapped
/// rows first, then small rows, then large rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelSpec {
    /// Rows reserved for placard holders.
    pub handicapped_rows: u32,
    /// Rows for small cars.
    pub small_rows: u32,
    /// Rows for large cars.
    pub large_rows: u32,
}

impl LevelSpec {
    /// Build a level from its three row counts.
    pub const fn new(handicapped_rows: u32, small_rows: u32, large_rows: u32) -> Self {
        Self {
            handicapped_rows,
            small_rows,
            large_rows,
        }
    }

    /// Row count for one category.
    pub const fn rows_of(&self, category: Category) -> u32 {
        match category {
            Category::Handicapped => self.handicapped_rows,
            Category::Small => self.small_rows,
            Category::Large => self.large_rows,
        }
    }

    /// Total rows on the level, saturating.
    pub const fn total_rows(&self) -> u32 {
        self.handicapped_rows
            .saturating_add(self.small_rows)
            .saturating_add(self.large_rows)
    }
}

/// Static description of the garage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Levels, lowest (closest) first.
    pub levels: Vec<LevelSpec>,
    /// Spaces in every row.
    pub slots_per_row: u32,
}

impl LayoutConfig {
    /// Spaces per row in the reference garage.
    pub const REFERENCE_SLOTS_PER_ROW: u32 = 10;

    /// The reference garage: three levels of ten-space rows.
    ///
    /// | Level | Handicapped | Small | Large |
    /// |-------|-------------|-------|-------|
    /// | 1     | 2           | 4     | 0     |
    /// | 2     | 0           | 4     | 4     |
    /// | 3     | 0           | 4     | 4     |
    ///
    /// That is 20 handicapped, 120 small and 80 large slots.
    pub fn reference() -> Self {
        Self {
            levels: vec![
                LevelSpec::new(2, 4, 0),
                LevelSpec::new(0, 4, 4),
                LevelSpec::new(0, 4, 4),
            ],
            slots_per_row: Self::REFERENCE_SLOTS_PER_ROW,
        }
    }

    /// Number of slots configured for `category`, or `None` on overflow.
    pub fn capacity_of(&self, category: Category) -> Option<usize> {
        let rows = self
            .levels
            .iter()
            .try_fold(0usize, |acc, l| acc.checked_add(l.rows_of(category) as usize))?;
        rows.checked_mul(self.slots_per_row as usize)
    }

    /// Check structural invariants.
    ///
    /// The garage needs at least one level, non-empty rows, and at least
    /// one slot overall. A category may be empty. Level and row counts must
    /// fit the `u32` address components, and slot counts must not overflow.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.levels.is_empty() {
            return Err(LayoutError::NoLevels);
        }
        if u32::try_from(self.levels.len()).is_err() {
            return Err(LayoutError::TooManyLevels {
                levels: self.levels.len(),
            });
        }
        if self.slots_per_row == 0 {
            return Err(LayoutError::EmptyRows);
        }
        for (level, spec) in self.levels.iter().enumerate() {
            let rows = spec.handicapped_rows as u64 + spec.small_rows as u64 + spec.large_rows as u64;
            if rows > u32::MAX as u64 {
                return Err(LayoutError::TooManyRows { level, rows });
            }
        }
        let mut total = 0usize;
        for category in Category::ALL {
            let capacity = self
                .capacity_of(category)
                .ok_or(LayoutError::CapacityOverflow { category })?;
            total = total
                .checked_add(capacity)
                .ok_or(LayoutError::CapacityOverflow { category })?;
        }
        if total == 0 {
            return Err(LayoutError::NoSlots);
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_capacities() {
        let layout = LayoutConfig::reference();
        assert_eq!(layout.capacity_of(Category::Handicapped), Some(20));
        assert_eq!(layout.capacity_of(Category::Small), Some(120));
        assert_eq!(layout.capacity_of(Category::Large), Some(80));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn level_rows() {
        let level = LevelSpec::new(2, 4, 1);
        assert_eq!(level.total_rows(), 7);
        assert_eq!(level.rows_of(Category::Large), 1);
    }

    #[test]
    fn validate_no_levels_fails() {
        let layout = LayoutConfig {
            levels: vec![],
            slots_per_row: 10,
        };
        assert_eq!(layout.validate(), Err(LayoutError::NoLevels));
    }

    #[test]
    fn validate_zero_slots_per_row_fails() {
        let layout = LayoutConfig {
            slots_per_row: 0,
            ..LayoutConfig::reference()
        };
        assert_eq!(layout.validate(), Err(LayoutError::EmptyRows));
    }

    #[test]
    fn validate_all_levels_empty_fails() {
        let layout = LayoutConfig {
            levels: vec![LevelSpec::default(); 2],
            slots_per_row: 10,
        };
        assert_eq!(layout.validate(), Err(LayoutError::NoSlots));
    }

    #[test]
    fn validate_row_overflow_fails() {
        let layout = LayoutConfig {
            levels: vec![LevelSpec::new(u32::MAX, 1, 0)],
            slots_per_row: 1,
        };
        match layout.validate() {
            Err(LayoutError::TooManyRows { level: 0, .. }) => {}
            other => panic!("expected TooManyRows, got {other:?}"),
        }
    }

    #[test]
    fn empty_category_is_allowed() {
        let layout = LayoutConfig {
            levels: vec![LevelSpec::new(0, 1, 0)],
            slots_per_row: 3,
        };
        assert!(layout.validate().is_ok());
        assert_eq!(layout.capacity_of(Category::Handicapped), Some(0));
    }
}
