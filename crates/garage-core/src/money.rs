//! Monetary amounts.

use std::fmt;

/// An amount of money in US cents.
///
/// Unsigned, so a computed charge can never go negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cents(pub u64);

impl Cents {
    /// Zero.
    pub const ZERO: Cents = Cents(0);

    /// Whole and fractional dollars, for display and JSON payloads.
    #[inline]
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Sum, saturating at `u64::MAX`.
    #[inline]
    pub const fn saturating_add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
