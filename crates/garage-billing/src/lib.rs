//! Parking fee calculation.
//!
//! [`BillingConfig::amount`] prices a completed stay. It is a pure
//! function of its inputs and the configuration, so it can run outside
//! whatever lock guards the occupancy state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod rates;

pub use config::{BillingConfig, BillingConfigError};
pub use rates::RateCard;
