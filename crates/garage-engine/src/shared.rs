//! Thread-safe handle to one engine.
//!
//! [`SharedGarage`] serializes every assignment and release behind a
//! single mutex. The coordinate tables are immutable and shared outside
//! the lock, so address translation never contends with allocation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use garage_core::{AllocError, Category, SpaceAddress};
use garage_layout::CoordinateMap;

use crate::engine::{Checkout, GarageEngine, Parked};
use crate::metrics::GarageMetrics;
use crate::policy::ParkRequest;

/// Cloneable, `Send + Sync` handle to a [`GarageEngine`].
///
/// Each call takes the lock for exactly one engine operation. Engine
/// operations never leave the table half-updated, so a lock poisoned by
/// a panicking caller is recovered rather than propagated.
#[derive(Clone, Debug)]
pub struct SharedGarage {
    engine: Arc<Mutex<GarageEngine>>,
    map: Arc<CoordinateMap>,
}

impl SharedGarage {
    /// Take ownership of `engine`.
    pub fn new(engine: GarageEngine) -> Self {
        let map = engine.map_handle();
        Self {
            engine: Arc::new(Mutex::new(engine)),
            map,
        }
    }

    /// Assign a slot to `request` at the current time.
    pub fn park(&self, request: ParkRequest) -> Result<Parked, AllocError> {
        self.lock().park(request)
    }

    /// Free the slot at a 0-based `address` and bill the stay.
    pub fn unpark(&self, address: SpaceAddress) -> Result<Checkout, AllocError> {
        let slot = self.map.to_slot(address)?;
        self.lock().checkout(slot)
    }

    /// Free slots in `category`.
    pub fn free_count(&self, category: Category) -> usize {
        self.lock().free_count(category)
    }

    /// Counters since construction.
    pub fn metrics(&self) -> GarageMetrics {
        self.lock().metrics()
    }

    /// The coordinate tables.
    pub fn map(&self) -> &CoordinateMap {
        &self.map
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut GarageEngine) -> R) -> R {
        f(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, GarageEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
