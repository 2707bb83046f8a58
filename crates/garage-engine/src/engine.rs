//! The allocation engine.
//!
//! [`GarageEngine`] owns the occupancy table and is the only thing that
//! mutates it. Every operation either completes fully or returns an error
//! with the table unchanged: slot selection and billing run before the
//! single write that claims or frees a slot.

use std::fmt;
use std::sync::Arc;

use garage_billing::BillingConfig;
use garage_core::{AddressError, AllocError, Category, Cents, Clock, SlotId, SpaceAddress, Timestamp};
use garage_layout::CoordinateMap;
use log::{debug, warn};

use crate::config::{ConfigError, GarageConfig};
use crate::metrics::GarageMetrics;
use crate::occupancy::{Occupancy, OccupancyTable};
use crate::policy::{self, ParkRequest};

// ── Results ────────────────────────────────────────────────────────

/// A successful assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parked {
    /// The slot claimed.
    pub slot: SlotId,
    /// Where it is, 0-based.
    pub address: SpaceAddress,
    /// What was recorded in it.
    pub occupancy: Occupancy,
}

/// A successful release with its bill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkout {
    /// The slot freed.
    pub slot: SlotId,
    /// Where it is, 0-based.
    pub address: SpaceAddress,
    /// What was recorded in it until now.
    pub occupancy: Occupancy,
    /// End of the stay used for billing.
    pub stopped_at: Timestamp,
    /// Amount owed.
    pub amount: Cents,
}

// ── GarageEngine ───────────────────────────────────────────────────

/// Single owner of a garage's occupancy state.
///
/// # Example
///
/// ```
/// use garage_core::{Category, Cents, Timestamp};
/// use garage_engine::{GarageConfig, GarageEngine, ParkRequest, SystemClock};
///
/// let mut engine = GarageEngine::new(GarageConfig::reference(), Box::new(SystemClock))?;
///
/// let parked = engine.park_at(ParkRequest::new(false, false), Timestamp::from_secs(0))?;
/// assert_eq!(parked.slot.category, Category::Small);
/// // Level 1 opens with two handicapped rows.
/// assert_eq!(parked.address.to_one_based(), (1, 3, 1));
///
/// let bill = engine.checkout_at(parked.slot, Timestamp::from_secs(3600))?;
/// assert_eq!(bill.amount, Cents(500));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GarageEngine {
    map: Arc<CoordinateMap>,
    billing: BillingConfig,
    table: OccupancyTable,
    clock: Box<dyn Clock>,
    checkout_offset_ms: i64,
    metrics: GarageMetrics,
}

impl GarageEngine {
    /// Validate `config`, build the coordinate tables and start with every
    /// slot free.
    pub fn new(config: GarageConfig, clock: Box<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = CoordinateMap::new(&config.layout)?;
        let table = OccupancyTable::for_map(&map);
        debug!(
            "garage ready: {} handicapped, {} small, {} large slots",
            map.capacity(Category::Handicapped),
            map.capacity(Category::Small),
            map.capacity(Category::Large),
        );
        Ok(Self {
            map: Arc::new(map),
            billing: config.billing,
            table,
            clock,
            checkout_offset_ms: config.checkout_offset_ms,
            metrics: GarageMetrics::default(),
        })
    }

    // ── Assignment ─────────────────────────────────────────────────

    /// Assign the best free slot to `request`, stamped with the clock's
    /// current time.
    pub fn assign_space(&mut self, request: ParkRequest) -> Result<SlotId, AllocError> {
        self.park(request).map(|p| p.slot)
    }

    /// [`assign_space`](Self::assign_space) with an explicit start time.
    pub fn assign_space_at(
        &mut self,
        request: ParkRequest,
        now: Timestamp,
    ) -> Result<SlotId, AllocError> {
        self.park_at(request, now).map(|p| p.slot)
    }

    /// Like [`assign_space`](Self::assign_space), also returning the
    /// address and recorded entry.
    pub fn park(&mut self, request: ParkRequest) -> Result<Parked, AllocError> {
        let now = self.clock.now();
        self.park_at(request, now)
    }

    /// Like [`park`](Self::park) with an explicit start time.
    ///
    /// # Errors
    ///
    /// [`AllocError::NoSpaceAvailable`] if nothing eligible is free, and
    /// [`AllocError::InvalidTimestamp`] if `now` is the vacant sentinel.
    pub fn park_at(&mut self, request: ParkRequest, now: Timestamp) -> Result<Parked, AllocError> {
        let result = self.try_park(request, now);
        match &result {
            Ok(parked) => {
                self.metrics.record_assignment(parked.slot.category);
                debug!(
                    "assigned {} at {} to {} car",
                    parked.slot, parked.address, parked.occupancy.occupant
                );
            }
            Err(e @ AllocError::NoSpaceAvailable { .. }) => {
                self.metrics.rejected_assignments += 1;
                warn!("{e}");
            }
            Err(e) => {
                self.metrics.rejected_assignments += 1;
                debug!("assignment rejected: {e}");
            }
        }
        result
    }

    fn try_park(&mut self, request: ParkRequest, now: Timestamp) -> Result<Parked, AllocError> {
        if now.is_vacant() {
            return Err(AllocError::InvalidTimestamp);
        }
        let slot = policy::select_slot(&self.table, &self.map, request)?;
        let address = self.map.to_address(slot)?;
        let occupancy = Occupancy {
            started_at: now,
            occupant: request.occupant(),
        };
        self.table.occupy(slot, occupancy)?;
        Ok(Parked {
            slot,
            address,
            occupancy,
        })
    }

    // ── Release ────────────────────────────────────────────────────

    /// Free `slot` without billing, returning what was parked there.
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidAddress`] for a slot outside the garage and
    /// [`AllocError::SlotAlreadyFree`] if nothing is parked there.
    pub fn release_space(&mut self, slot: SlotId) -> Result<Occupancy, AllocError> {
        match self.table.vacate(slot) {
            Ok(occupancy) => {
                self.metrics.record_release();
                debug!("released {slot}");
                Ok(occupancy)
            }
            Err(e) => {
                self.metrics.rejected_releases += 1;
                debug!("release rejected: {e}");
                Err(e)
            }
        }
    }

    /// Free `slot` and bill the stay, stopping at the clock's current time
    /// shifted by the configured checkout offset.
    pub fn checkout(&mut self, slot: SlotId) -> Result<Checkout, AllocError> {
        let now = self.clock.now();
        let stop = if now.is_vacant() {
            now
        } else {
            now.offset_by(self.checkout_offset_ms)
        };
        self.checkout_at(slot, stop)
    }

    /// Free `slot` and bill the stay up to `now`. No offset is applied.
    ///
    /// The amount is computed before the slot is cleared, so a failure
    /// leaves the car parked.
    ///
    /// # Errors
    ///
    /// Everything [`release_space`](Self::release_space) returns, plus
    /// [`AllocError::InvalidDuration`] if `now` precedes the start of the
    /// stay and [`AllocError::InvalidTimestamp`] if `now` is the vacant
    /// sentinel.
    pub fn checkout_at(&mut self, slot: SlotId, now: Timestamp) -> Result<Checkout, AllocError> {
        let result = self.try_checkout(slot, now);
        match &result {
            Ok(bill) => {
                self.metrics.record_checkout(bill.amount);
                debug!(
                    "released {} at {} after {} ms, owes {}",
                    bill.slot,
                    bill.address,
                    bill.stopped_at
                        .millis_since(bill.occupancy.started_at)
                        .unwrap_or(0),
                    bill.amount
                );
            }
            Err(e) => {
                self.metrics.rejected_releases += 1;
                debug!("checkout rejected: {e}");
            }
        }
        result
    }

    fn try_checkout(&mut self, slot: SlotId, now: Timestamp) -> Result<Checkout, AllocError> {
        if now.is_vacant() {
            return Err(AllocError::InvalidTimestamp);
        }
        let occupancy = self
            .table
            .get(slot)?
            .ok_or(AllocError::SlotAlreadyFree { slot })?;
        let address = self.map.to_address(slot)?;
        let amount = self
            .billing
            .amount(occupancy.occupant, slot.category, occupancy.started_at, now)?;
        self.table.vacate(slot)?;
        Ok(Checkout {
            slot,
            address,
            occupancy,
            stopped_at: now,
            amount,
        })
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Current entry of `slot`: `Ok(None)` if free.
    pub fn occupancy(&self, slot: SlotId) -> Result<Option<Occupancy>, AddressError> {
        self.table.get(slot)
    }

    /// Free slots in `category`.
    pub fn free_count(&self, category: Category) -> usize {
        self.table.free_count(category)
    }

    /// Total slots in `category`.
    pub fn capacity(&self, category: Category) -> usize {
        self.table.capacity(category)
    }

    /// The occupancy table, read-only.
    pub fn table(&self) -> &OccupancyTable {
        &self.table
    }

    /// The coordinate tables.
    pub fn map(&self) -> &CoordinateMap {
        &self.map
    }

    /// A shared handle to the coordinate tables, usable without holding
    /// the engine.
    pub fn map_handle(&self) -> Arc<CoordinateMap> {
        Arc::clone(&self.map)
    }

    /// Rates and rounding in effect.
    pub fn billing(&self) -> &BillingConfig {
        &self.billing
    }

    /// Milliseconds added to the clock at checkout.
    pub fn checkout_offset_ms(&self) -> i64 {
        self.checkout_offset_ms
    }

    /// Counters since construction.
    pub fn metrics(&self) -> GarageMetrics {
        self.metrics
    }
}

impl fmt::Debug for GarageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GarageEngine")
            .field("free", &Category::ALL.map(|c| self.free_count(c)))
            .field("billing", &self.billing)
            .field("checkout_offset_ms", &self.checkout_offset_ms)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
