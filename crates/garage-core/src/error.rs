//! Error types for the garage engine.
//!
//! Organized by subsystem: addressing (coordinate map), billing, and
//! allocation. Every variant is a recoverable, request-scoped failure;
//! none of them leaves engine state partially updated.

use std::error::Error;
use std::fmt;

use crate::category::Category;
use crate::id::{SlotId, SpaceAddress};
use crate::time::Timestamp;

/// A level/row/space triple or a category/index pair that does not name
/// a configured slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressError {
    /// The level does not exist.
    LevelOutOfRange {
        /// The requested address.
        address: SpaceAddress,
        /// Number of configured levels.
        levels: u32,
    },
    /// The row does not exist on that level.
    RowOutOfRange {
        /// The requested address.
        address: SpaceAddress,
        /// Number of rows on the requested level.
        rows: u32,
    },
    /// The space does not exist in that row.
    SpaceOutOfRange {
        /// The requested address.
        address: SpaceAddress,
        /// Spaces per row.
        spaces: u32,
    },
    /// The flat index is past the end of the category.
    IndexOutOfRange {
        /// The requested slot.
        slot: SlotId,
        /// Number of slots in the category.
        capacity: usize,
    },
    /// A 1-based component was 0.
    ZeroBased {
        /// Level as supplied.
        level: u32,
        /// Row as supplied.
        row: u32,
        /// Space as supplied.
        space: u32,
    },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelOutOfRange { address, levels } => {
                write!(f, "invalid address {address}: garage has {levels} levels")
            }
            Self::RowOutOfRange { address, rows } => {
                write!(f, "invalid address {address}: level has {rows} rows")
            }
            Self::SpaceOutOfRange { address, spaces } => {
                write!(f, "invalid address {address}: rows have {spaces} spaces")
            }
            Self::IndexOutOfRange { slot, capacity } => {
                write!(
                    f,
                    "invalid slot {slot}: {} has {capacity} slots",
                    slot.category
                )
            }
            Self::ZeroBased { level, row, space } => {
                write!(
                    f,
                    "invalid address ({level}, {row}, {space}): numbering starts at 1"
                )
            }
        }
    }
}

impl Error for AddressError {}

/// Errors from the billing calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillingError {
    /// The stop time precedes the start time.
    InvalidDuration {
        /// When parking started.
        start: Timestamp,
        /// When parking stopped.
        stop: Timestamp,
    },
}

impl fmt::Display for BillingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { start, stop } => {
                write!(f, "invalid parking duration: stop {stop} precedes start {start}")
            }
        }
    }
}

impl Error for BillingError {}

/// Errors from assigning or releasing a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// No eligible slot is free anywhere in the garage.
    NoSpaceAvailable {
        /// Whether the request carried a handicapped placard.
        wants_handicapped: bool,
        /// Size category of the car.
        car: Category,
    },
    /// Release of a slot that has no occupant.
    SlotAlreadyFree {
        /// The slot in question.
        slot: SlotId,
    },
    /// A specific slot was requested but already has an occupant.
    SlotOccupied {
        /// The slot in question.
        slot: SlotId,
    },
    /// The slot or address does not exist.
    InvalidAddress(AddressError),
    /// Billing rejected the stay (clock went backwards).
    InvalidDuration(BillingError),
    /// The clock reported the reserved vacant sentinel.
    InvalidTimestamp,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpaceAvailable {
                wants_handicapped,
                car,
            } => {
                let placard = if *wants_handicapped { " with placard" } else { "" };
                write!(f, "no space available for {car} car{placard}")
            }
            Self::SlotAlreadyFree { slot } => write!(f, "slot {slot} is already free"),
            Self::SlotOccupied { slot } => write!(f, "slot {slot} is occupied"),
            Self::InvalidAddress(e) => write!(f, "{e}"),
            Self::InvalidDuration(e) => write!(f, "{e}"),
            Self::InvalidTimestamp => write!(f, "clock reported the vacant sentinel"),
        }
    }
}

impl Error for AllocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAddress(e) => Some(e),
            Self::InvalidDuration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AddressError> for AllocError {
    fn from(e: AddressError) -> Self {
        Self::InvalidAddress(e)
    }
}

impl From<BillingError> for AllocError {
    fn from(e: BillingError) -> Self {
        Self::InvalidDuration(e)
    }
}
