//! Cumulative counters for the allocation engine.
//!
//! [`GarageMetrics`] is updated by every assignment and release and can be
//! copied out at any time for logging or a shutdown report.

use garage_core::{Category, Cents};

/// Counts of engine outcomes since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GarageMetrics {
    /// Successful assignments, indexed by the space category received.
    pub assigned: [u64; Category::COUNT],
    /// Assignments rejected for any reason.
    pub rejected_assignments: u64,
    /// Successful releases.
    pub released: u64,
    /// Releases rejected for any reason.
    pub rejected_releases: u64,
    /// Sum of all checkout amounts, saturating.
    pub billed: Cents,
}

impl GarageMetrics {
    /// Successful assignments into `category` spaces.
    pub fn assigned_to(&self, category: Category) -> u64 {
        self.assigned[category.index()]
    }

    /// Successful assignments across all categories.
    pub fn total_assigned(&self) -> u64 {
        self.assigned.iter().sum()
    }

    pub(crate) fn record_assignment(&mut self, category: Category) {
        self.assigned[category.index()] += 1;
    }

    pub(crate) fn record_release(&mut self) {
        self.released += 1;
    }

    pub(crate) fn record_checkout(&mut self, amount: Cents) {
        self.record_release();
        self.billed = self.billed.saturating_add(amount);
    }
}
