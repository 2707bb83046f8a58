//! Wall-clock timestamps with a reserved "vacant" sentinel.

use std::fmt;

/// Milliseconds since the Unix epoch.
///
/// [`Timestamp::VACANT`] is reserved: an occupancy entry holding it is
/// free. A clock never legitimately reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Sentinel start time of a free slot.
    pub const VACANT: Timestamp = Timestamp(u64::MAX);

    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Build from whole milliseconds.
    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Build from whole seconds, saturating.
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Milliseconds since the epoch.
    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// `true` for the free-slot sentinel.
    #[inline]
    pub const fn is_vacant(self) -> bool {
        self.0 == Self::VACANT.0
    }

    /// Milliseconds from `earlier` to `self`, or `None` if `earlier` is later.
    #[inline]
    pub const fn millis_since(self, earlier: Timestamp) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }

    /// Shift by a signed number of milliseconds, saturating at both ends.
    ///
    /// Never produces [`VACANT`](Self::VACANT); the upper bound stops one
    /// millisecond short of it.
    pub const fn offset_by(self, delta_ms: i64) -> Self {
        let shifted = if delta_ms >= 0 {
            self.0.saturating_add(delta_ms as u64)
        } else {
            self.0.saturating_sub(delta_ms.unsigned_abs())
        };
        if shifted == Self::VACANT.0 {
            Self(shifted - 1)
        } else {
            Self(shifted)
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_vacant() {
            f.write_str("vacant")
        } else {
            write!(f, "{}ms", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_since_is_checked() {
        let a = Timestamp::from_secs(10);
        let b = Timestamp::from_millis(12_500);
        assert_eq!(b.millis_since(a), Some(2_500));
        assert_eq!(a.millis_since(b), None);
    }

    #[test]
    fn offset_never_reaches_sentinel() {
        let near_end = Timestamp(u64::MAX - 5);
        assert!(!near_end.offset_by(100).is_vacant());
        assert_eq!(Timestamp(3).offset_by(-10), Timestamp::EPOCH);
        assert_eq!(Timestamp(3_000).offset_by(3_600_000), Timestamp(3_603_000));
    }

    #[test]
    fn sentinel_display() {
        assert_eq!(Timestamp::VACANT.to_string(), "vacant");
        assert_eq!(Timestamp(42).to_string(), "42ms");
    }
}
