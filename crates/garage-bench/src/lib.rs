//! Benchmark profiles and workloads for the garage engine.
//!
//! - [`reference_engine`]: an empty reference garage (20/120/80)
//! - [`random_workload`]: a seeded mix of arrivals and departures
//! - [`run_workload`]: replay a workload against an engine with
//!   deterministic timestamps

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use garage_core::{AllocError, Cents, SlotId, Timestamp};
use garage_engine::{ConfigError, GarageConfig, GarageEngine, ParkRequest, SystemClock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// An empty reference garage.
///
/// The clock is the system clock; workloads pass explicit timestamps so
/// results do not depend on it.
pub fn reference_engine() -> Result<GarageEngine, ConfigError> {
    GarageEngine::new(GarageConfig::reference(), Box::new(SystemClock))
}

/// One step of a workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadOp {
    /// A car arrives.
    Park(ParkRequest),
    /// The n-th currently parked car (modulo the number parked) leaves.
    Unpark(usize),
}

/// Generate `len` operations from `seed`.
///
/// Roughly 10% of arrivals carry a placard and 40% are large cars.
/// Arrivals outnumber departures 3:2, so a long workload saturates the
/// garage and then oscillates around full.
pub fn random_workload(len: usize, seed: u64) -> Vec<WorkloadOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.random_range(0..5) < 3 {
                WorkloadOp::Park(ParkRequest::new(
                    rng.random_bool(0.1),
                    rng.random_bool(0.4),
                ))
            } else {
                WorkloadOp::Unpark(rng.random_range(0..usize::MAX))
            }
        })
        .collect()
}

/// Outcome counts of [`run_workload`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkloadStats {
    /// Successful arrivals.
    pub parked: u64,
    /// Arrivals turned away.
    pub rejected: u64,
    /// Departures.
    pub unparked: u64,
    /// Sum of all bills.
    pub billed: Cents,
}

/// Replay `ops` against `engine`, one simulated second per operation.
///
/// Departures with nobody parked are skipped.
pub fn run_workload(engine: &mut GarageEngine, ops: &[WorkloadOp]) -> Result<WorkloadStats, AllocError> {
    let mut held: Vec<SlotId> = Vec::new();
    let mut stats = WorkloadStats::default();
    for (second, op) in (1u64..).zip(ops) {
        let now = Timestamp::from_secs(second);
        match *op {
            WorkloadOp::Park(request) => match engine.assign_space_at(request, now) {
                Ok(slot) => {
                    held.push(slot);
                    stats.parked += 1;
                }
                Err(AllocError::NoSpaceAvailable { .. }) => stats.rejected += 1,
                Err(e) => return Err(e),
            },
            WorkloadOp::Unpark(n) => {
                if held.is_empty() {
                    continue;
                }
                let slot = held.swap_remove(n % held.len());
                let bill = engine.checkout_at(slot, now)?;
                stats.unparked += 1;
                stats.billed = stats.billed.saturating_add(bill.amount);
            }
        }
    }
    Ok(stats)
}
