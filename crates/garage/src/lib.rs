//! Garage: space allocation and billing for a multi-level parking garage.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all garage sub-crates. For most users, adding `garage` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use garage::prelude::*;
//!
//! let mut engine = GarageEngine::new(GarageConfig::reference(), Box::new(SystemClock)).unwrap();
//!
//! // A compact car with a placard lands in the first handicapped space.
//! let parked = engine
//!     .park_at(ParkRequest::new(true, false), Timestamp::from_secs(0))
//!     .unwrap();
//! assert_eq!(parked.address.to_one_based(), (1, 1, 1));
//!
//! // Two hours later it leaves and pays the handicapped rate.
//! let bill = engine
//!     .checkout_at(parked.slot, Timestamp::from_secs(7200))
//!     .unwrap();
//! assert_eq!(bill.amount, Cents(1000));
//!
//! // Its space is free again.
//! assert_eq!(engine.release_space(parked.slot), Err(AllocError::SlotAlreadyFree { slot: parked.slot }));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `garage-core` | Categories, ids, timestamps, cents, errors, `Clock` |
//! | [`layout`] | `garage-layout` | Layout configuration and the coordinate map |
//! | [`billing`] | `garage-billing` | Rates and the fee calculation |
//! | [`engine`] | `garage-engine` | Occupancy, assignment policy, `SharedGarage` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, ids and errors (`garage-core`).
pub use garage_core as types;

/// Layout configuration and coordinate translation (`garage-layout`).
///
/// [`layout::CoordinateMap`] converts between level/row/space addresses
/// and per-category slot indices.
pub use garage_layout as layout;

/// Rates and billing (`garage-billing`).
pub use garage_billing as billing;

/// The allocation engine (`garage-engine`).
///
/// [`engine::GarageEngine`] for single-owner use, [`engine::SharedGarage`]
/// for sharing across threads.
pub use garage_engine as engine;

/// Common imports for typical garage usage.
///
/// ```rust
/// use garage::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use garage_core::{Category, Cents, Clock, SlotId, SpaceAddress, Timestamp};

    // Errors
    pub use garage_core::{AddressError, AllocError, BillingError};

    // Layout and billing
    pub use garage_billing::{BillingConfig, RateCard};
    pub use garage_layout::{CoordinateMap, LayoutConfig, LevelSpec};

    // Engine
    pub use garage_engine::{
        Checkout, ConfigError, GarageConfig, GarageEngine, GarageMetrics, Parked, ParkRequest,
        SharedGarage, SystemClock,
    };
}
