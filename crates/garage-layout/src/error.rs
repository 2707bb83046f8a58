//! Layout construction errors.

use std::error::Error;
use std::fmt;

use garage_core::Category;

/// Errors detected by [`LayoutConfig::validate`](crate::LayoutConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// No levels configured.
    NoLevels,
    /// Level count does not fit a `u32` address component.
    TooManyLevels {
        /// Configured level count.
        levels: usize,
    },
    /// Row count on a level does not fit a `u32` address component.
    TooManyRows {
        /// 0-based level index.
        level: usize,
        /// Total rows requested on that level.
        rows: u64,
    },
    /// `slots_per_row` is zero.
    EmptyRows,
    /// Every level is empty.
    NoSlots,
    /// Slot count for a category overflows `usize`.
    CapacityOverflow {
        /// The category whose count overflowed.
        category: Category,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLevels => write!(f, "layout has no levels"),
            Self::TooManyLevels { levels } => {
                write!(f, "{levels} levels exceeds u32::MAX")
            }
            Self::TooManyRows { level, rows } => {
                write!(f, "level {level} has {rows} rows, exceeds u32::MAX")
            }
            Self::EmptyRows => write!(f, "slots_per_row must be at least 1"),
            Self::NoSlots => write!(f, "layout has no parking slots"),
            Self::CapacityOverflow { category } => {
                write!(f, "{category} slot count overflows usize")
            }
        }
    }
}

impl Error for LayoutError {}
