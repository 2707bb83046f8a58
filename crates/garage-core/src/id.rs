//! Slot identifiers and human-facing space addresses.

use std::fmt;

use crate::category::Category;
use crate::error::AddressError;

/// Internal address of a slot: its category and flat index.
///
/// Flat indices are dense per category and ordered by proximity
/// (level, then row, then position in row), so a lower index is always
/// at least as close as a higher one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    /// Category of the space.
    pub category: Category,
    /// Position within the category's flat array.
    pub index: usize,
}

impl SlotId {
    /// Build a slot id.
    pub const fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category, self.index)
    }
}

/// Human-facing address of a space: level, row within level, and space
/// within row.
///
/// All three components are **0-based**. The HTTP surface speaks 1-based
/// numbers; convert with [`from_one_based`](Self::from_one_based) and
/// [`to_one_based`](Self::to_one_based) at that boundary only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceAddress {
    /// Level (floor), 0-based.
    pub level: u32,
    /// Row within the level, 0-based.
    pub row: u32,
    /// Space within the row, 0-based.
    pub space: u32,
}

impl SpaceAddress {
    /// Build a 0-based address.
    pub const fn new(level: u32, row: u32, space: u32) -> Self {
        Self { level, row, space }
    }

    /// Convert 1-based user input into a 0-based address.
    ///
    /// Returns [`AddressError::ZeroBased`] if any component is 0. Whether
    /// the address exists in the garage is checked later by the
    /// coordinate map.
    pub fn from_one_based(level: u32, row: u32, space: u32) -> Result<Self, AddressError> {
        if level == 0 || row == 0 || space == 0 {
            return Err(AddressError::ZeroBased { level, row, space });
        }
        Ok(Self::new(level - 1, row - 1, space - 1))
    }

    /// The address as 1-based `(level, row, space)`.
    pub const fn to_one_based(self) -> (u32, u32, u32) {
        (self.level + 1, self.row + 1, self.space + 1)
    }
}

impl fmt::Display for SpaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l, r, s) = self.to_one_based();
        write!(f, "L{l}/R{r}/S{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_based_conversion() {
        let addr = SpaceAddress::from_one_based(1, 3, 10).unwrap();
        assert_eq!(addr, SpaceAddress::new(0, 2, 9));
        assert_eq!(addr.to_one_based(), (1, 3, 10));
    }

    #[test]
    fn zero_component_rejected() {
        for (l, r, s) in [(0, 1, 1), (1, 0, 1), (1, 1, 0)] {
            match SpaceAddress::from_one_based(l, r, s) {
                Err(AddressError::ZeroBased { .. }) => {}
                other => panic!("expected ZeroBased for ({l},{r},{s}), got {other:?}"),
            }
        }
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(SpaceAddress::new(1, 4, 0).to_string(), "L2/R5/S1");
        assert_eq!(SlotId::new(Category::Large, 7).to_string(), "large#7");
    }

    proptest! {
        #[test]
        fn one_based_round_trip(l in 1u32..1000, r in 1u32..1000, s in 1u32..1000) {
            let addr = SpaceAddress::from_one_based(l, r, s).unwrap();
            prop_assert_eq!(addr.to_one_based(), (l, r, s));
        }
    }
}
