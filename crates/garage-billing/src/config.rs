//! Billing configuration and the fee calculation.

use std::error::Error;
use std::fmt;

use garage_core::{BillingError, Category, Cents, Timestamp};

use crate::rates::RateCard;

const MS_PER_HOUR: u128 = 3_600_000;

/// Errors detected by [`BillingConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillingConfigError {
    /// `time_rounding_ms` is zero.
    ZeroTimeRounding,
    /// `currency_rounding` is zero.
    ZeroCurrencyRounding,
}

impl fmt::Display for BillingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTimeRounding => write!(f, "time_rounding_ms must be at least 1"),
            Self::ZeroCurrencyRounding => write!(f, "currency_rounding must be at least 1 cent"),
        }
    }
}

impl Error for BillingConfigError {}

/// Rates and rounding rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BillingConfig {
    /// Hourly rates.
    pub rates: RateCard,
    /// Elapsed time is rounded up to a multiple of this. Default: 3000 (3 s).
    pub time_rounding_ms: u64,
    /// Amounts are rounded up to a multiple of this. Default: 1 cent.
    pub currency_rounding: Cents,
}

impl BillingConfig {
    /// Default time rounding unit: 3 seconds.
    pub const DEFAULT_TIME_ROUNDING_MS: u64 = 3_000;

    /// Default currency rounding unit: one cent.
    pub const DEFAULT_CURRENCY_ROUNDING: Cents = Cents(1);

    /// Reference rates with default rounding.
    pub const fn reference() -> Self {
        Self {
            rates: RateCard::REFERENCE,
            time_rounding_ms: Self::DEFAULT_TIME_ROUNDING_MS,
            currency_rounding: Self::DEFAULT_CURRENCY_ROUNDING,
        }
    }

    /// Reject zero rounding units.
    pub fn validate(&self) -> Result<(), BillingConfigError> {
        if self.time_rounding_ms == 0 {
            return Err(BillingConfigError::ZeroTimeRounding);
        }
        if self.currency_rounding.0 == 0 {
            return Err(BillingConfigError::ZeroCurrencyRounding);
        }
        Ok(())
    }

    /// Amount owed for a stay from `start` to `stop`.
    ///
    /// The hourly rate comes from [`RateCard::hourly`]. Elapsed time is
    /// rounded up to the time unit, priced, and the result rounded up to
    /// the currency unit. All arithmetic is exact; results past `u64::MAX`
    /// cents saturate.
    ///
    /// # Errors
    ///
    /// [`BillingError::InvalidDuration`] if `stop` precedes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use garage_billing::BillingConfig;
    /// use garage_core::{Category, Cents, Timestamp};
    ///
    /// let billing = BillingConfig::reference();
    /// // 3595 s rounds up to 3597 s, which is just under an hour at $5/h.
    /// let owed = billing
    ///     .amount(Category::Small, Category::Small, Timestamp::EPOCH, Timestamp::from_secs(3595))
    ///     .unwrap();
    /// assert_eq!(owed, Cents(500));
    /// ```
    pub fn amount(
        &self,
        occupant: Category,
        space: Category,
        start: Timestamp,
        stop: Timestamp,
    ) -> Result<Cents, BillingError> {
        let elapsed = stop
            .millis_since(start)
            .ok_or(BillingError::InvalidDuration { start, stop })?;
        let rate = self.rates.hourly(occupant, space);

        // Zero units are rejected by validate(); treat them as 1 here so an
        // unvalidated config cannot divide by zero.
        let time_unit = u128::from(self.time_rounding_ms.max(1));
        let cent_unit = u128::from(self.currency_rounding.0.max(1));

        let charged_ms = u128::from(elapsed).div_ceil(time_unit) * time_unit;
        let cents = charged_ms
            .checked_mul(u128::from(rate.0))
            .map(|numer| numer.div_ceil(MS_PER_HOUR * cent_unit) * cent_unit)
            .unwrap_or(u128::MAX);
        Ok(Cents(u64::try_from(cents).unwrap_or(u64::MAX)))
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self::reference()
    }
}
