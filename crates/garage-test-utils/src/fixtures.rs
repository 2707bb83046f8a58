//! Layout fixtures.
//!
//! - [`reference_layout`]: the 20/120/80 reference garage.
//! - [`single_row`]: one row of one category, for exhaustion tests.
//! - [`two_level`]: a small mixed garage where every fallback path is
//!   reachable with a handful of cars.

use garage_core::{Category, SpaceAddress};
use garage_layout::{LayoutConfig, LevelSpec};

pub fn reference_layout() -> LayoutConfig {
    LayoutConfig::reference()
}

/// One level holding a single row of `category` with `spaces` slots.
pub fn single_row(category: Category, spaces: u32) -> LayoutConfig {
    let mut level = LevelSpec::default();
    match category {
        Category::Handicapped => level.handicapped_rows = 1,
        Category::Small => level.small_rows = 1,
        Category::Large => level.large_rows = 1,
    }
    LayoutConfig {
        levels: vec![level],
        slots_per_row: spaces,
    }
}

/// Two levels of two-space rows.
///
/// | Level | Handicapped | Small | Large |
/// |-------|-------------|-------|-------|
/// | 1     | 1           | 1     | 0     |
/// | 2     | 0           | 1     | 1     |
pub fn two_level() -> LayoutConfig {
    LayoutConfig {
        levels: vec![LevelSpec::new(1, 1, 0), LevelSpec::new(0, 1, 1)],
        slots_per_row: 2,
    }
}

/// Build a 0-based address from 1-based components.
///
/// Panics on a zero component; fixtures only.
pub fn one_based(level: u32, row: u32, space: u32) -> SpaceAddress {
    SpaceAddress::from_one_based(level, row, space).expect("1-based address")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_validate() {
        for layout in [
            reference_layout(),
            single_row(Category::Large, 3),
            two_level(),
        ] {
            assert!(layout.validate().is_ok());
        }
    }

    #[test]
    fn single_row_capacity() {
        let layout = single_row(Category::Handicapped, 4);
        assert_eq!(layout.capacity_of(Category::Handicapped), Some(4));
        assert_eq!(layout.capacity_of(Category::Small), Some(0));
    }

    #[test]
    fn one_based_converts() {
        assert_eq!(one_based(1, 1, 1), SpaceAddress::new(0, 0, 0));
    }
}
