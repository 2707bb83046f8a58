//! Garage layout and coordinate mapping.
//!
//! A garage is a stack of levels; each level holds handicapped rows, then
//! small-car rows, then large-car rows, every row with the same number of
//! spaces. [`CoordinateMap`] numbers the slots of each category densely in
//! (level, row, space) order and translates between that flat numbering and
//! human-facing [`SpaceAddress`](garage_core::SpaceAddress)es.
//!
//! Both directions are precomputed tables built once from a
//! [`LayoutConfig`]; lookups are O(1) and side-effect free, so a map can be
//! shared across threads without coordination.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod map;

pub use config::{LayoutConfig, LevelSpec};
pub use error::LayoutError;
pub use map::CoordinateMap;
