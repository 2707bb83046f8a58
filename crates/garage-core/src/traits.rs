//! Core abstraction traits.

use crate::time::Timestamp;

/// Source of the current time for parking start and stop stamps.
///
/// The engine reads the clock once per assignment and once per checkout.
/// Implementations must be cheap and must never return
/// [`Timestamp::VACANT`]; the engine rejects that reading rather than
/// record a slot that would look free.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
