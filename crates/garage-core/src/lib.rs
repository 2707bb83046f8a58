//! Core types and traits for the garage allocation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace:
//! space categories, slot and address identifiers, timestamps and
//! amounts, the [`Clock`] trait, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod category;
pub mod error;
pub mod id;
pub mod money;
pub mod time;
pub mod traits;

pub use category::Category;
pub use error::{AddressError, AllocError, BillingError};
pub use id::{SlotId, SpaceAddress};
pub use money::Cents;
pub use time::Timestamp;
pub use traits::Clock;
