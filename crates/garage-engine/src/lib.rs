//! Parking space allocation engine.
//!
//! [`GarageEngine`] is the single owner of mutable occupancy state. It
//! picks the closest eligible free slot for an arriving car
//! ([`policy`]), records who parked and when ([`occupancy`]), and on
//! departure frees the slot and prices the stay through
//! [`garage_billing`].
//!
//! All operations take `&mut self` and run in bounded time (a linear scan
//! of one category at worst). Callers that share an engine across threads
//! go through [`SharedGarage`], which wraps it in a mutex so that each
//! assignment or release observes and mutates state atomically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod occupancy;
pub mod policy;
pub mod shared;

pub use clock::SystemClock;
pub use config::{ConfigError, GarageConfig};
pub use engine::{Checkout, GarageEngine, Parked};
pub use metrics::GarageMetrics;
pub use occupancy::{Occupancy, OccupancyTable};
pub use policy::ParkRequest;
pub use shared::SharedGarage;
