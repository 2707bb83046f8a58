//! Wall clock.

use std::time::{SystemTime, UNIX_EPOCH};

use garage_core::{Clock, Timestamp};

/// [`Clock`] backed by [`SystemTime`].
///
/// Readings before the Unix epoch clamp to it. Readings are capped one
/// millisecond below [`Timestamp::VACANT`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Timestamp(ms.min(Timestamp::VACANT.0 - 1))
    }
}
