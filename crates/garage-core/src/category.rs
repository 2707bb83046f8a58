//! Space and car categories.

use std::fmt;

/// A partition of parking slots, and the size class of a parked car.
///
/// The same enum serves both roles. A space's category decides which cars
/// it admits; an occupant's category decides how it is billed. A car with
/// a handicapped placard is recorded as [`Category::Handicapped`] no matter
/// which space it ends up in.
///
/// Variant order is significant: [`Category::index`] is used to address
/// per-category arrays, and [`Category::ALL`] lists them in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Reserved for cars with a handicapped placard (any size).
    Handicapped,
    /// Compact spaces; small cars only.
    Small,
    /// Full-size spaces; any car.
    Large,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 3;

    /// Every category in index order.
    pub const ALL: [Category; Category::COUNT] =
        [Category::Handicapped, Category::Small, Category::Large];

    /// Dense index of this category, `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Handicapped => 0,
            Self::Small => 1,
            Self::Large => 2,
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Handicapped),
            1 => Some(Self::Small),
            2 => Some(Self::Large),
            _ => None,
        }
    }

    /// Size category of a car, ignoring any placard.
    #[inline]
    pub const fn for_car(is_large_car: bool) -> Self {
        if is_large_car {
            Self::Large
        } else {
            Self::Small
        }
    }

    /// Short lowercase name, used in logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Handicapped => "handicapped",
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for (i, cat) in Category::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
            assert_eq!(Category::from_index(i), Some(*cat));
        }
        assert_eq!(Category::from_index(Category::COUNT), None);
    }

    #[test]
    fn car_size_maps_to_open_categories() {
        assert_eq!(Category::for_car(false), Category::Small);
        assert_eq!(Category::for_car(true), Category::Large);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Category::Handicapped.to_string(), "handicapped");
        assert_eq!(format!("{}", Category::Large), "large");
    }
}
